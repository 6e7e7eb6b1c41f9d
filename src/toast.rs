use std::time::{Duration, Instant};

/// Short-lived message drawn above the current screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    until: Instant,
}

impl Toast {
    pub fn new(text: impl Into<String>, now: Instant, duration: Duration) -> Self {
        Self {
            text: text.into(),
            until: now + duration,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.until
    }
}

/// Drop the toast once its time is up.
pub fn expire(toast: &mut Option<Toast>, now: Instant) {
    if toast.as_ref().is_some_and(|t| t.is_expired(now)) {
        *toast = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_expires_after_its_duration() {
        let now = Instant::now();
        let mut toast = Some(Toast::new("Спробуйте ще раз", now, Duration::from_millis(2000)));

        expire(&mut toast, now + Duration::from_millis(1999));
        assert!(toast.is_some());
        expire(&mut toast, now + Duration::from_millis(2000));
        assert!(toast.is_none());
    }
}
