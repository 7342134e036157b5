//! Accessibility audit for menu button wiring.
//!
//! Checks the WAI-ARIA menu button pattern against WCAG 2.1:
//! - Name/role/value (4.1.2): haspopup, expanded, menu and menuitem roles
//! - Keyboard (2.1.1): items programmatically focusable
//! - Info and relationships (1.3.1): trigger resolves to a non-empty menu

use menubutton_core::aria::{self, ARIA_EXPANDED, ARIA_HASPOPUP, ROLE, TABINDEX, TABINDEX_PROGRAMMATIC};
use menubutton_core::{AriaRole, Document, Host, MenuButtonConfig, NodeId};
use std::fmt;

/// Menu button accessibility audit.
pub struct MenuButtonAudit;

impl MenuButtonAudit {
    /// Audit `trigger` using the default configuration.
    #[must_use]
    pub fn check(document: &Document, trigger: NodeId) -> A11yReport {
        Self::check_with_config(document, trigger, &MenuButtonConfig::default())
    }

    /// Audit `trigger` with a custom configuration.
    #[must_use]
    pub fn check_with_config(
        document: &Document,
        trigger: NodeId,
        config: &MenuButtonConfig,
    ) -> A11yReport {
        let mut violations = Vec::new();

        if document.get_attribute(&trigger, ARIA_HASPOPUP).as_deref() != Some("true") {
            violations.push(A11yViolation::new(
                "aria-haspopup",
                "Menu trigger missing aria-haspopup=\"true\"",
                "4.1.2",
                Impact::Critical,
            ));
        }

        let expanded = document.get_attribute(&trigger, ARIA_EXPANDED);
        if !matches!(expanded.as_deref(), Some("true" | "false")) {
            violations.push(A11yViolation::new(
                "aria-expanded",
                format!("Menu trigger aria-expanded must be \"true\" or \"false\", found {expanded:?}"),
                "4.1.2",
                Impact::Serious,
            ));
        }

        let menu_id = document
            .get_attribute(&trigger, &config.opens_attribute)
            .unwrap_or_default();
        let Some(menu) = document.get_element_by_id(&menu_id) else {
            violations.push(A11yViolation::new(
                "menu-reference",
                format!("Trigger references missing menu #{menu_id}"),
                "1.3.1",
                Impact::Critical,
            ));
            return A11yReport { violations };
        };

        if document.get_attribute(&menu, ROLE).as_deref() != Some(AriaRole::Menu.as_str()) {
            violations.push(A11yViolation::new(
                "menu-role",
                format!("#{menu_id} missing role=\"menu\""),
                "4.1.2",
                Impact::Critical,
            ));
        }

        if aria::decode_bool(expanded.as_deref()) == document.is_hidden(&menu) {
            violations.push(A11yViolation::new(
                "expanded-state",
                format!("aria-expanded does not match visibility of #{menu_id}"),
                "4.1.2",
                Impact::Serious,
            ));
        }

        let items = document.query_selector_all(&menu, &config.item_selector);
        if items.is_empty() {
            violations.push(A11yViolation::new(
                "menu-items",
                format!("#{menu_id} has no menu items"),
                "1.3.1",
                Impact::Critical,
            ));
        }

        for (index, item) in items.iter().enumerate() {
            if document.get_attribute(item, ROLE).as_deref() != Some(AriaRole::MenuItem.as_str()) {
                violations.push(A11yViolation::new(
                    "menuitem-role",
                    format!("Item {index} of #{menu_id} missing role=\"menuitem\""),
                    "4.1.2",
                    Impact::Critical,
                ));
            }
            if document.get_attribute(item, TABINDEX).as_deref() != Some(TABINDEX_PROGRAMMATIC) {
                violations.push(A11yViolation::new(
                    "menuitem-tabindex",
                    format!("Item {index} of #{menu_id} should have tabindex=\"-1\""),
                    "2.1.1",
                    Impact::Moderate,
                ));
            }
        }

        A11yReport { violations }
    }
}

/// Findings from one audit run.
#[derive(Debug, Default)]
pub struct A11yReport {
    /// Findings in the order they were detected
    pub violations: Vec<A11yViolation>,
}

impl A11yReport {
    /// No findings.
    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.violations.is_empty()
    }

    /// Findings that break the pattern for assistive technology outright.
    #[must_use]
    pub fn critical(&self) -> Vec<&A11yViolation> {
        self.violations
            .iter()
            .filter(|v| v.impact == Impact::Critical)
            .collect()
    }

    /// Whether `rule` fired.
    #[must_use]
    pub fn has_rule(&self, rule: &str) -> bool {
        self.violations.iter().any(|v| v.rule == rule)
    }

    /// # Panics
    ///
    /// Panics listing every finding unless the report passes.
    pub fn assert_pass(&self) {
        if self.is_passing() {
            return;
        }
        let listing = self
            .violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        panic!(
            "Accessibility check failed with {} violation(s):\n{listing}",
            self.violations.len()
        );
    }
}

/// One failed audit rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A11yViolation {
    /// Rule id, e.g. `menu-role`
    pub rule: String,
    /// What is wrong and where
    pub message: String,
    /// WCAG 2.1 success criterion
    pub wcag: String,
    /// Severity
    pub impact: Impact,
}

impl A11yViolation {
    fn new(rule: &str, message: impl Into<String>, wcag: &str, impact: Impact) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
            wcag: wcag.to_string(),
            impact,
        }
    }
}

impl fmt::Display for A11yViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  [{:?}] {}: {} (WCAG {})",
            self.impact, self.rule, self.message, self.wcag
        )
    }
}

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Impact {
    /// Degrades keyboard use; the menu still works with a pointer
    Moderate,
    /// State is announced wrongly
    Serious,
    /// The pattern is unusable for assistive technology
    Critical,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MenuFixture;

    fn wire(doc: &Document, trigger: NodeId, menu: NodeId, items: &[NodeId]) {
        doc.set_attribute(&trigger, ARIA_HASPOPUP, "true");
        doc.set_attribute(&trigger, ARIA_EXPANDED, "false");
        doc.set_attribute(&menu, ROLE, "menu");
        doc.set_hidden(&menu, true);
        for item in items {
            doc.set_attribute(item, ROLE, "menuitem");
            doc.set_attribute(item, TABINDEX, "-1");
        }
    }

    #[test]
    fn test_unwired_markup_fails() {
        let f = MenuFixture::new().build();
        let report = MenuButtonAudit::check(&f.document, f.trigger);

        assert!(!report.is_passing());
        assert!(report.has_rule("aria-haspopup"));
        assert!(report.has_rule("aria-expanded"));
        assert!(report.has_rule("menu-role"));
        assert!(report.has_rule("menuitem-role"));
        assert!(report.has_rule("menuitem-tabindex"));
    }

    #[test]
    fn test_wired_markup_passes() {
        let f = MenuFixture::new().build();
        wire(&f.document, f.trigger, f.menu(), &f.items);
        MenuButtonAudit::check(&f.document, f.trigger).assert_pass();
    }

    #[test]
    fn test_missing_menu_is_critical() {
        let f = MenuFixture::new().without_menu().build();
        let report = MenuButtonAudit::check(&f.document, f.trigger);
        assert!(report.has_rule("menu-reference"));
        assert!(report.critical().iter().any(|v| v.rule == "menu-reference"));
    }

    #[test]
    fn test_expanded_state_drift() {
        let f = MenuFixture::new().build();
        wire(&f.document, f.trigger, f.menu(), &f.items);
        f.document.set_attribute(&f.trigger, ARIA_EXPANDED, "true");

        let report = MenuButtonAudit::check(&f.document, f.trigger);

        assert!(report.has_rule("expanded-state"));
        assert_eq!(report.violations.len(), 1);
        assert!(report.critical().is_empty());
    }

    #[test]
    fn test_missing_tabindex_is_moderate() {
        let f = MenuFixture::new().items(1).build();
        wire(&f.document, f.trigger, f.menu(), &f.items);
        f.document.remove_attribute(&f.items[0], TABINDEX);

        let report = MenuButtonAudit::check(&f.document, f.trigger);

        assert_eq!(report.violations.len(), 1);
        let violation = &report.violations[0];
        assert_eq!(violation.impact, Impact::Moderate);
        assert!(violation.impact < Impact::Critical);
        assert_eq!(
            violation.to_string(),
            "  [Moderate] menuitem-tabindex: Item 0 of #menu should have tabindex=\"-1\" (WCAG 2.1.1)"
        );
    }

    #[test]
    fn test_empty_menu() {
        let f = MenuFixture::new().items(0).build();
        let report = MenuButtonAudit::check(&f.document, f.trigger);
        assert!(report.has_rule("menu-items"));
    }

    #[test]
    fn test_custom_config() {
        let f = MenuFixture::new()
            .opens_attribute("data-menu")
            .item_tag("li")
            .build();
        wire(&f.document, f.trigger, f.menu(), &f.items);
        let config = MenuButtonConfig::new().opens_attribute("data-menu").item_selector("li");

        MenuButtonAudit::check_with_config(&f.document, f.trigger, &config).assert_pass();
    }

    #[test]
    #[should_panic(expected = "Accessibility check failed")]
    fn test_assert_pass_panics() {
        let f = MenuFixture::new().build();
        MenuButtonAudit::check(&f.document, f.trigger).assert_pass();
    }
}
