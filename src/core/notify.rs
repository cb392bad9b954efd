//! Transient notification banners.
//!
//! Banners stack newest-first at the top of the page's content region and
//! each one removes itself after a fixed delay. There is no queue limit and
//! no de-duplication.

use std::fmt;
use std::str::FromStr;

use crate::config::notify::DISMISS_AFTER_MS;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    /// Contextual class suffix used by the page stylesheet.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "danger",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "error" | "danger" => Ok(Self::Error),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A banner ready to be mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub severity: Severity,
}

impl Banner {
    /// ARIA role of the banner element.
    pub const ROLE: &'static str = "alert";
    /// Class of the close button.
    pub const CLOSE_CLASS: &'static str = "btn-close";
    /// `data-bs-dismiss` value wiring the close button to the banner.
    pub const DISMISS_TARGET: &'static str = "alert";

    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    /// Class list of the banner element.
    pub fn class_name(&self) -> String {
        format!("alert alert-{} alert-dismissible fade show", self.severity.tag())
    }
}

/// Page region banners are mounted into.
pub trait BannerHost {
    /// Handle to a mounted banner.
    type Mounted;

    /// Insert the banner before the container's first child.
    ///
    /// Returns `None` when the container is not on the page.
    fn mount(&self, banner: &Banner) -> Option<Self::Mounted>;

    /// Remove a mounted banner once `delay_ms` has elapsed.
    fn dismiss_after(&self, mounted: Self::Mounted, delay_ms: u32);
}

/// Severity-tagged entry points over a [`BannerHost`].
pub struct Notifier<H> {
    host: H,
}

impl<H: BannerHost> Notifier<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn success(&self, message: &str) {
        self.show(message, Severity::Success);
    }

    pub fn error(&self, message: &str) {
        self.show(message, Severity::Error);
    }

    pub fn info(&self, message: &str) {
        self.show(message, Severity::Info);
    }

    pub fn warning(&self, message: &str) {
        self.show(message, Severity::Warning);
    }

    /// Mount a banner and schedule its removal. No-op without a container.
    pub fn show(&self, message: &str, severity: Severity) {
        let banner = Banner::new(message, severity);
        match self.host.mount(&banner) {
            Some(mounted) => self.host.dismiss_after(mounted, DISMISS_AFTER_MS),
            None => tracing::debug!(%severity, "no notification container; banner dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// In-memory container: banners are stored newest-first.
    #[derive(Default)]
    struct FakeRegion {
        present: bool,
        banners: RefCell<Vec<(usize, Banner)>>,
        timers: RefCell<Vec<(usize, u32)>>,
        next_id: RefCell<usize>,
    }

    impl FakeRegion {
        fn present() -> Self {
            Self {
                present: true,
                ..Self::default()
            }
        }

        /// Fire every pending removal timer.
        fn expire_all(&self) {
            for (id, _) in self.timers.borrow_mut().drain(..) {
                self.banners.borrow_mut().retain(|(b, _)| *b != id);
            }
        }
    }

    impl BannerHost for FakeRegion {
        type Mounted = usize;

        fn mount(&self, banner: &Banner) -> Option<usize> {
            if !self.present {
                return None;
            }
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            self.banners.borrow_mut().insert(0, (*next, banner.clone()));
            Some(*next)
        }

        fn dismiss_after(&self, mounted: usize, delay_ms: u32) {
            self.timers.borrow_mut().push((mounted, delay_ms));
        }
    }

    #[test]
    fn test_missing_container_is_noop() {
        let notifier = Notifier::new(FakeRegion::default());
        notifier.success("saved");
        assert!(notifier.host().banners.borrow().is_empty());
        assert!(notifier.host().timers.borrow().is_empty());
    }

    #[test]
    fn test_banners_stack_newest_first() {
        let notifier = Notifier::new(FakeRegion::present());
        notifier.info("first");
        notifier.error("second");
        notifier.error("second");

        let banners = notifier.host().banners.borrow();
        let messages: Vec<_> = banners.iter().map(|(_, b)| b.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "second", "first"]);
        assert_eq!(banners[0].1.severity, Severity::Error);
    }

    #[test]
    fn test_each_banner_expires_after_five_seconds() {
        let notifier = Notifier::new(FakeRegion::present());
        notifier.warning("disk almost full");
        notifier.success("synced");

        assert_eq!(*notifier.host().timers.borrow(), vec![(1, 5000), (2, 5000)]);
        notifier.host().expire_all();
        assert!(notifier.host().banners.borrow().is_empty());
    }

    #[test]
    fn test_banner_classes() {
        assert_eq!(
            Banner::new("x", Severity::Error).class_name(),
            "alert alert-danger alert-dismissible fade show"
        );
        assert_eq!(
            Banner::new("x", Severity::Success).class_name(),
            "alert alert-success alert-dismissible fade show"
        );
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("danger".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!("error".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!("warning".parse::<Severity>(), Ok(Severity::Warning));
        assert!("fatal".parse::<Severity>().is_err());
    }
}
