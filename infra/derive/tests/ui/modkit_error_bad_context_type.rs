#[modkit_derive::modkit_error]
pub enum BadContext {
    Io { source: std::io::Error, context: String },
}

fn main() {}
