#[modkit_derive::modkit_error]
pub enum NoContext {
    Io { source: std::io::Error },
}

fn main() {}
