#[modkit_derive::feature_definition(side = Physical)]
pub struct Furnace;

fn main() {}
