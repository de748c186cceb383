use crate::form::element::FormId;

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    ChooseFile { form: FormId, path: String },
    Submit { form: FormId },
    Quit,
}
