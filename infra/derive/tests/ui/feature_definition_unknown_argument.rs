#[modkit_derive::feature_definition(side = Common, weight = 2)]
pub struct Heavy;

fn main() {}
