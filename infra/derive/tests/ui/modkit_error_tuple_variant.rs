#[modkit_derive::modkit_error]
pub enum TupleError {
    Tuple(std::io::Error),
}

fn main() {}
