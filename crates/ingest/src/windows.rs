use authlog_core::Window;

/// `from` sent for the window starting at id 0. The API omits id 0 unless
/// asked from -1.
const FIRST_WINDOW_FROM: i64 = -1;

/// Fetch windows covering `[last_count, current_count)`.
///
/// Cloning restarts iteration from the same position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Windows {
    next: i64,
    end: i64,
    size: i64,
}

/// Plans the windows needed to bring a log at `last_count` up to
/// `current_count`. Window `k` covers ids
/// `last_count + k * window_size ..= last_count + (k + 1) * window_size - 1`,
/// with the last window clipped to `current_count - 1`. Nothing is planned
/// when `current_count <= last_count`.
pub fn compute_windows(last_count: i64, current_count: i64, window_size: u64) -> Windows {
    let size = i64::try_from(window_size).unwrap_or(i64::MAX).max(1);
    Windows {
        next: last_count.max(0),
        end: current_count,
        size,
    }
}

impl Windows {
    pub fn remaining(&self) -> usize {
        if self.next >= self.end {
            return 0;
        }
        let span = self.end - self.next;
        let count = span / self.size + i64::from(span % self.size != 0);
        usize::try_from(count).unwrap_or(usize::MAX)
    }
}

impl Iterator for Windows {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        if self.next >= self.end {
            return None;
        }
        let start = self.next;
        let to = start.saturating_add(self.size - 1).min(self.end - 1);
        let from = if start == 0 { FIRST_WINDOW_FROM } else { start };
        self.next = to + 1;
        Some(Window::new(from, to))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Windows {}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(last: i64, current: i64, size: u64) -> Vec<(i64, i64)> {
        compute_windows(last, current, size)
            .map(|window| (window.from, window.to))
            .collect()
    }

    #[test]
    fn first_sync_starts_below_zero_and_clips_last_window() {
        assert_eq!(pairs(0, 1000, 400), vec![(-1, 399), (400, 799), (800, 999)]);
    }

    #[test]
    fn resumed_sync_starts_at_previous_count() {
        assert_eq!(pairs(1000, 1200, 400), vec![(1000, 1199)]);
        assert_eq!(pairs(5212, 6000, 500), vec![(5212, 5711), (5712, 5999)]);
    }

    #[test]
    fn no_windows_when_up_to_date() {
        assert!(pairs(1000, 1000, 400).is_empty());
        assert!(pairs(1200, 1000, 400).is_empty());
        assert!(pairs(0, 0, 400).is_empty());
    }

    #[test]
    fn exact_multiple_has_no_trailing_window() {
        assert_eq!(pairs(0, 800, 400), vec![(-1, 399), (400, 799)]);
    }

    #[test]
    fn single_entry_remote() {
        assert_eq!(pairs(0, 1, 500), vec![(-1, 0)]);
        assert_eq!(pairs(7, 8, 500), vec![(7, 7)]);
    }

    #[test]
    fn negative_last_count_is_treated_as_fresh_start() {
        assert_eq!(pairs(-5, 3, 10), vec![(-1, 2)]);
    }

    #[test]
    fn zero_window_size_behaves_as_one() {
        assert_eq!(pairs(3, 6, 0), vec![(3, 3), (4, 4), (5, 5)]);
    }

    #[test]
    fn clone_restarts_iteration() {
        let mut windows = compute_windows(0, 1000, 400);
        let restart = windows.clone();
        windows.next();
        assert_eq!(windows.len(), 2);
        assert_eq!(restart.len(), 3);
        assert_eq!(restart.collect::<Vec<_>>().len(), 3);
    }

    #[test]
    fn windows_are_contiguous_and_cover_the_gap() {
        for (last, current, size) in [(0, 1, 1), (0, 999, 400), (17, 1234, 50), (400, 401, 400)] {
            let windows: Vec<Window> = compute_windows(last, current, size).collect();
            assert_eq!(windows.len(), compute_windows(last, current, size).remaining());
            let mut expected_start = last;
            for window in &windows {
                let intended_from = if window.from == FIRST_WINDOW_FROM { 0 } else { window.from };
                assert_eq!(intended_from, expected_start);
                assert!(window.to >= intended_from);
                assert!(window.to - intended_from < size as i64);
                expected_start = window.to + 1;
            }
            assert_eq!(expected_start, current);
        }
    }
}
