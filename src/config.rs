use crate::contact::{FieldRule, FieldSpec};
use crate::stagger::{StaggerGroup, Variant};

/// The hooks the host markup must provide. The behavior layer never creates
/// or styles DOM; it only toggles classes, attributes and inline styles on
/// the elements named here.
#[derive(Clone, Copy, Debug)]
pub struct DomContract {
    pub navbar_id: &'static str,
    pub theme_toggle_id: &'static str,
    pub theme_icon_id: &'static str,
    pub hamburger_id: &'static str,
    pub nav_links_id: &'static str,
    pub form_id: &'static str,
    pub success_banner_id: &'static str,
    pub reveal_selector: &'static str,
    pub entrance_selector: &'static str,
    pub nav_link_selector: &'static str,
    pub section_selector: &'static str,
    pub anchor_selector: &'static str,
    pub visible_class: &'static str,
    pub active_class: &'static str,
    pub scrolled_class: &'static str,
    pub open_class: &'static str,
    pub invalid_class: &'static str,
    pub contact_fields: &'static [FieldSpec],
    pub stagger_groups: &'static [StaggerGroup],
}

const CONTACT_FIELDS: [FieldSpec; 4] = [
    FieldSpec {
        input_id: "contactName",
        error_id: "nameError",
        rule: FieldRule::MinChars(2),
    },
    FieldSpec {
        input_id: "contactEmail",
        error_id: "emailError",
        rule: FieldRule::Email,
    },
    FieldSpec {
        input_id: "contactSubject",
        error_id: "subjectError",
        rule: FieldRule::MinChars(3),
    },
    FieldSpec {
        input_id: "contactMessage",
        error_id: "messageError",
        rule: FieldRule::MinChars(10),
    },
];

// Smaller groups get higher intersection thresholds so they do not trigger
// from a sliver of the container.
const STAGGER_GROUPS: [StaggerGroup; 5] = [
    StaggerGroup {
        container: ".skill-tag-col",
        item: ".skill-tag",
        step_ms: 70,
        threshold: 0.15,
        variant: Variant::Fade {
            offset_px: 16,
            duration_s: 0.4,
        },
    },
    StaggerGroup {
        container: ".values-grid",
        item: ".value-card",
        step_ms: 80,
        threshold: 0.10,
        variant: Variant::Fade {
            offset_px: 24,
            duration_s: 0.5,
        },
    },
    StaggerGroup {
        container: ".projects-mini-grid",
        item: ".proj-mini-card",
        step_ms: 80,
        threshold: 0.08,
        variant: Variant::Fade {
            offset_px: 24,
            duration_s: 0.5,
        },
    },
    StaggerGroup {
        container: ".cert-grid",
        item: ".cert-card",
        step_ms: 90,
        threshold: 0.08,
        variant: Variant::Fade {
            offset_px: 28,
            duration_s: 0.5,
        },
    },
    StaggerGroup {
        container: ".skill-bars",
        item: ".progress-fill",
        step_ms: 80,
        threshold: 0.15,
        variant: Variant::Progress { base_delay_ms: 180 },
    },
];

impl Default for DomContract {
    fn default() -> Self {
        Self {
            navbar_id: "navbar",
            theme_toggle_id: "darkToggle",
            theme_icon_id: "toggleIcon",
            hamburger_id: "hamburger",
            nav_links_id: "navLinks",
            form_id: "contactForm",
            success_banner_id: "formSuccess",
            reveal_selector: ".reveal",
            entrance_selector: ".slide-left, .slide-right",
            nav_link_selector: ".nav-link",
            section_selector: "section[id]",
            anchor_selector: "a[href^=\"#\"]",
            visible_class: "visible",
            active_class: "active",
            scrolled_class: "scrolled",
            open_class: "open",
            invalid_class: "invalid",
            contact_fields: &CONTACT_FIELDS,
            stagger_groups: &STAGGER_GROUPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn contract_binds_every_form_field() {
        let contract = DomContract::default();
        assert_eq!(contract.contact_fields.len(), 4);
        assert_eq!(contract.form_id, "contactForm");
    }

    #[test]
    fn every_stagger_group_has_distinct_container() {
        let contract = DomContract::default();
        let mut containers: Vec<&str> =
            contract.stagger_groups.iter().map(|group| group.container).collect();
        containers.sort_unstable();
        containers.dedup();
        assert_eq!(containers.len(), contract.stagger_groups.len());
    }
}
