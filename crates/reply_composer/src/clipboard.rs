/// Best-effort clipboard sink. Implementations report whether the text was
/// accepted and must not panic on failure.
pub trait Clipboard {
    fn copy(&self, text: &str) -> bool;
}

impl<F> Clipboard for F
where
    F: Fn(&str) -> bool,
{
    fn copy(&self, text: &str) -> bool {
        self(text)
    }
}
