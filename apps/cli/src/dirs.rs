use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = "authlog";

/// Flag beats config, config beats `$HOME/.local/share/authlog`.
pub fn resolve_data_dir(
    flag: Option<&Path>,
    configured: Option<&Path>,
) -> Result<PathBuf, String> {
    if let Some(dir) = flag.or(configured) {
        return Ok(dir.to_path_buf());
    }
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_config() {
        let dir = resolve_data_dir(Some(Path::new("/flag")), Some(Path::new("/config")))
            .expect("dir");
        assert_eq!(dir, PathBuf::from("/flag"));
        let dir = resolve_data_dir(None, Some(Path::new("/config"))).expect("dir");
        assert_eq!(dir, PathBuf::from("/config"));
    }
}
