use std::path::PathBuf;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub base_url: Option<String>,
    pub window_size: Option<u64>,
    pub parallel: bool,
    pub json: bool,
    pub help: bool,
}

pub fn parse_args<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut parsed = CliArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                parsed.config = Some(PathBuf::from(next_value(&mut args, "--config")?));
            }
            "--data-dir" => {
                parsed.data_dir = Some(PathBuf::from(next_value(&mut args, "--data-dir")?));
            }
            "--base-url" => {
                parsed.base_url = Some(next_value(&mut args, "--base-url")?);
            }
            "--window-size" => {
                let value = next_value(&mut args, "--window-size")?;
                let size = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid window size: {value}"))?;
                parsed.window_size = Some(size);
            }
            "--parallel" => {
                parsed.parallel = true;
            }
            "--json" => {
                parsed.json = true;
            }
            "--help" | "-h" => {
                parsed.help = true;
            }
            _ => {
                return Err(format!("unknown argument: {arg}"));
            }
        }
    }

    Ok(parsed)
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next()
        .ok_or_else(|| format!("missing value for {flag}"))
}

pub fn print_help() {
    println!(
        "authlog-sync\n\n\
Pulls new authentication events from the remote API into the local log.\n\n\
Usage:\n  authlog-sync [options]\n\n\
Options:\n  --config <path>     Use this config file instead of the default\n  --data-dir <dir>    Store Logs.json and EntryInfo.json in <dir>\n  --base-url <url>    Override the API base url for this run\n  --window-size <n>   Records requested per window\n  --parallel          Fetch windows concurrently\n  --json              Print the sync summary as JSON\n  -h, --help          Show this help message\n"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, String> {
        parse_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn no_arguments_uses_defaults() {
        assert_eq!(parse(&[]).expect("args"), CliArgs::default());
    }

    #[test]
    fn parses_all_flags() {
        let args = parse(&[
            "--config",
            "/tmp/a.toml",
            "--data-dir",
            "/tmp/data",
            "--base-url",
            "http://localhost:9000",
            "--window-size",
            "250",
            "--parallel",
            "--json",
        ])
        .expect("args");
        assert_eq!(args.config, Some(PathBuf::from("/tmp/a.toml")));
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/data")));
        assert_eq!(args.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(args.window_size, Some(250));
        assert!(args.parallel);
        assert!(args.json);
        assert!(!args.help);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--window-size", "many"]).is_err());
        assert!(parse(&["--data-dir"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
    }
}
