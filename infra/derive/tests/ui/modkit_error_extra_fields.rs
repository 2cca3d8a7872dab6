use modkit_derive::modkit_error;
use std::borrow::Cow;

#[modkit_error]
pub enum LeafError {
    #[error("Leaf failed{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

mod outer {
    use super::LeafError;
    use modkit_derive::modkit_error;
    use std::borrow::Cow;

    // Two variants wrap the same source; neither gets a `From` impl.
    #[modkit_error]
    pub enum OuterError {
        #[error("Step {step} failed{}: {source}", format_context(.context))]
        Step { step: u32, source: LeafError, context: Option<Cow<'static, str>> },

        #[error("Cleanup {step} failed{}: {source}", format_context(.context))]
        Cleanup { step: u32, source: LeafError, context: Option<Cow<'static, str>> },
    }
}

fn main() {
    let err = outer::OuterError::Step { step: 2, source: "bad".into(), context: None };
    let err: Result<(), _> = Err(err);
    let err = outer::OuterErrorExt::context(err, "while testing").unwrap_err();
    assert_eq!(err.to_string(), "Step 2 failed (while testing): Leaf failed: bad");
}
