//! One-time page setup run when the document is ready.
//!
//! Injects the anti-forgery token into forms that lack it, then turns
//! tooltip and popover annotated elements into live widgets.

use crate::config::{CSRF_FORM_FIELD, toggles};
use crate::core::error::DomError;

/// Widget kinds activated by the UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Tooltip,
    Popover,
}

impl Toggle {
    pub fn selector(self) -> &'static str {
        match self {
            Self::Tooltip => toggles::TOOLTIP_SELECTOR,
            Self::Popover => toggles::POPOVER_SELECTOR,
        }
    }
}

/// The parts of the document the bootstrap touches.
pub trait PageDom {
    type Form;
    type Element;

    /// Every form on the page, in document order.
    fn forms(&self) -> Vec<Self::Form>;

    /// Whether the form already contains a field named `name`.
    fn form_has_field(&self, form: &Self::Form, name: &str) -> bool;

    /// Append `<input type="hidden" name=.. value=..>` to the form.
    fn append_hidden_field(&self, form: &Self::Form, name: &str, value: &str)
    -> Result<(), DomError>;

    /// Elements annotated for the given widget kind.
    fn toggles(&self, kind: Toggle) -> Vec<Self::Element>;
}

/// UI toolkit that turns annotated elements into widgets.
pub trait WidgetToolkit<E> {
    fn activate(&self, kind: Toggle, element: &E) -> Result<(), DomError>;
}

/// What a bootstrap pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub tokens_injected: usize,
    pub tooltips: usize,
    pub popovers: usize,
    pub failures: usize,
}

/// Run the page bootstrap.
///
/// Without a token no fields are injected. Forms that already carry the
/// field are left alone, so running it twice adds nothing.
pub fn bootstrap_page<D, W>(dom: &D, toolkit: &W, csrf_token: Option<&str>) -> BootstrapReport
where
    D: PageDom,
    W: WidgetToolkit<D::Element>,
{
    let mut report = BootstrapReport::default();

    if let Some(token) = csrf_token {
        for form in dom.forms() {
            if dom.form_has_field(&form, CSRF_FORM_FIELD) {
                continue;
            }
            match dom.append_hidden_field(&form, CSRF_FORM_FIELD, token) {
                Ok(()) => report.tokens_injected += 1,
                Err(err) => {
                    tracing::warn!("failed to inject anti-forgery field: {err}");
                    report.failures += 1;
                }
            }
        }
    }

    for kind in [Toggle::Tooltip, Toggle::Popover] {
        for element in dom.toggles(kind) {
            match toolkit.activate(kind, &element) {
                Ok(()) if kind == Toggle::Tooltip => report.tooltips += 1,
                Ok(()) => report.popovers += 1,
                Err(err) => {
                    tracing::warn!(?kind, "widget activation failed: {err}");
                    report.failures += 1;
                }
            }
        }
    }

    tracing::debug!(?report, "page bootstrap complete");
    report
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct FakePage {
        /// (name, value) fields per form.
        forms: RefCell<Vec<Vec<(String, String)>>>,
        tooltips: Vec<&'static str>,
        popovers: Vec<&'static str>,
    }

    impl FakePage {
        fn with_forms(forms: Vec<Vec<&str>>) -> Self {
            let forms = forms
                .into_iter()
                .map(|names| names.into_iter().map(|n| (n.to_string(), String::new())).collect())
                .collect();
            Self {
                forms: RefCell::new(forms),
                ..Self::default()
            }
        }
    }

    impl PageDom for FakePage {
        type Form = usize;
        type Element = &'static str;

        fn forms(&self) -> Vec<usize> {
            (0..self.forms.borrow().len()).collect()
        }

        fn form_has_field(&self, form: &usize, name: &str) -> bool {
            self.forms.borrow()[*form].iter().any(|(n, _)| n == name)
        }

        fn append_hidden_field(&self, form: &usize, name: &str, value: &str) -> Result<(), DomError> {
            self.forms.borrow_mut()[*form].push((name.to_string(), value.to_string()));
            Ok(())
        }

        fn toggles(&self, kind: Toggle) -> Vec<&'static str> {
            match kind {
                Toggle::Tooltip => self.tooltips.clone(),
                Toggle::Popover => self.popovers.clone(),
            }
        }
    }

    #[derive(Default)]
    struct FakeToolkit {
        activated: RefCell<Vec<(Toggle, &'static str)>>,
    }

    impl WidgetToolkit<&'static str> for FakeToolkit {
        fn activate(&self, kind: Toggle, element: &&'static str) -> Result<(), DomError> {
            if element.starts_with("broken") {
                return Err(DomError::Js("bootstrap is not defined".into()));
            }
            self.activated.borrow_mut().push((kind, *element));
            Ok(())
        }
    }

    #[test]
    fn test_injects_token_only_where_missing() {
        let page = FakePage::with_forms(vec![vec!["title"], vec!["csrfmiddlewaretoken"], vec![]]);
        let report = bootstrap_page(&page, &FakeToolkit::default(), Some("tok"));

        assert_eq!(report.tokens_injected, 2);
        let injected = ("csrfmiddlewaretoken".to_string(), "tok".to_string());
        let forms = page.forms.borrow();
        assert_eq!(forms[0].last(), Some(&injected));
        assert_eq!(forms[1].len(), 1);
        assert_eq!(forms[2], vec![injected.clone()]);
    }

    #[test]
    fn test_second_pass_adds_nothing() {
        let page = FakePage::with_forms(vec![vec![], vec![]]);
        bootstrap_page(&page, &FakeToolkit::default(), Some("tok"));
        let again = bootstrap_page(&page, &FakeToolkit::default(), Some("tok"));

        assert_eq!(again.tokens_injected, 0);
        assert!(page.forms.borrow().iter().all(|f| f.len() == 1));
    }

    #[test]
    fn test_no_token_no_injection() {
        let page = FakePage::with_forms(vec![vec![]]);
        let report = bootstrap_page(&page, &FakeToolkit::default(), None);
        assert_eq!(report.tokens_injected, 0);
        assert!(page.forms.borrow()[0].is_empty());
    }

    #[test]
    fn test_activates_tooltips_and_popovers() {
        let page = FakePage {
            tooltips: vec!["help-icon", "broken-icon"],
            popovers: vec!["details"],
            ..FakePage::default()
        };
        let toolkit = FakeToolkit::default();
        let report = bootstrap_page(&page, &toolkit, None);

        assert_eq!(
            report,
            BootstrapReport {
                tokens_injected: 0,
                tooltips: 1,
                popovers: 1,
                failures: 1,
            }
        );
        assert_eq!(
            *toolkit.activated.borrow(),
            vec![(Toggle::Tooltip, "help-icon"), (Toggle::Popover, "details")]
        );
    }

    #[test]
    fn test_selectors() {
        assert_eq!(Toggle::Tooltip.selector(), r#"[data-bs-toggle="tooltip"]"#);
        assert_eq!(Toggle::Popover.selector(), r#"[data-bs-toggle="popover"]"#);
    }
}
