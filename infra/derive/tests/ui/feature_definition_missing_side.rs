#[modkit_derive::feature_definition(priority = 3)]
pub struct NoSide;

fn main() {}
