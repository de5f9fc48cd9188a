use portfolio_app::config::DomContract;
use portfolio_app::contact::FieldRule;
use portfolio_app::navbar::active_index;
use portfolio_app::stagger::delay_for;
use portfolio_app::theme::{initial_theme, Theme};
use pretty_assertions::assert_eq;

fn field_results(contract: &DomContract, values: &[&str]) -> Vec<bool> {
    contract
        .contact_fields
        .iter()
        .zip(values)
        .map(|(spec, value)| spec.rule.validate(value))
        .collect()
}

#[test]
fn partially_invalid_form_flags_exactly_the_bad_fields() {
    let contract = DomContract::default();
    let results = field_results(&contract, &["A", "bad", "Hi there", "short"]);
    assert_eq!(results, vec![false, false, true, false]);
    assert!(!results.iter().all(|valid| *valid));
}

#[test]
fn fully_valid_form_passes_every_rule() {
    let contract = DomContract::default();
    let results = field_results(
        &contract,
        &["Jo", "a@b.co", "Hello", "This message is long enough."],
    );
    assert_eq!(results, vec![true, true, true, true]);
    assert!(results.iter().all(|valid| *valid));
}

#[test]
fn email_rule_is_shape_only() {
    assert!(FieldRule::Email.validate("anything@goes.here"));
    assert!(!FieldRule::Email.validate("rfc compliant but spaced@example.com"));
}

#[test]
fn active_section_follows_scroll_offset() {
    let thresholds = [0.0, 500.0, 1200.0];
    assert_eq!(active_index(&thresholds, 600.0), Some(1));
    assert_eq!(active_index(&thresholds, 5000.0), Some(2));
    assert_eq!(active_index(&[100.0, 500.0], 50.0), None);
}

#[test]
fn stagger_schedule_is_ordered_for_every_configured_group() {
    let contract = DomContract::default();
    for group in contract.stagger_groups {
        let mut previous = None;
        for index in 0..8 {
            let delay = delay_for(index, 0, group.step_ms);
            if let Some(previous) = previous {
                assert!(delay > previous, "group {} out of order", group.container);
            }
            previous = Some(delay);
        }
    }
}

#[test]
fn theme_survives_a_simulated_reload() {
    // Persisting goes through serde; a fresh read of the stored value must
    // reproduce the applied theme.
    let stored = serde_json::to_string(&Theme::Dark).unwrap();
    let reloaded: Theme = serde_json::from_str(&stored).unwrap();
    assert_eq!(initial_theme(Some(reloaded), false), Theme::Dark);
    assert_eq!(initial_theme(None, true), Theme::Dark);
}
