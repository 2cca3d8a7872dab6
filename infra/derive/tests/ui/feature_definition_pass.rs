use modkit_kernel::domain::side::Side;
use modkit_kernel::feature::FeatureDefinition;

#[modkit_derive::feature_definition(
    side = Client,
    priority = -5,
    can_be_disabled = false,
    description = "Draws container contents in tooltips."
)]
#[derive(Debug)]
pub struct ContainerTooltips;

#[modkit_derive::feature_definition(side = Server)]
#[derive(Debug)]
pub struct Defaults;

fn main() {
    let meta = ContainerTooltips::META;
    assert_eq!(meta.side, Side::Client);
    assert_eq!(meta.priority, -5);
    assert!(!meta.can_be_disabled);
    assert!(meta.enabled_by_default);
    assert_eq!(meta.description, "Draws container contents in tooltips.");

    let meta = Defaults::META;
    assert_eq!(meta.side, Side::Server);
    assert_eq!(meta.priority, 0);
    assert!(meta.can_be_disabled);
}
