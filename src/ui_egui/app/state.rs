/// State for the sidebar sign-in form
#[derive(Debug, Default)]
pub struct SignInState {
    pub is_open: bool,
    pub name: String,
    pub error: Option<String>,
}

impl SignInState {
    pub fn open(&mut self) {
        self.is_open = true;
        self.name.clear();
        self.error = None;
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.error = None;
    }

    /// The name as it will be stored, or None when blank.
    pub fn submitted_name(&self) -> Option<String> {
        let trimmed = self.name.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

#[derive(Debug, Default)]
pub struct AppState {
    pub sign_in: SignInState,
    /// Shows the one-time notification permission prompt
    pub show_permission_prompt: bool,
}
