use std::borrow::Cow;

use reedline::{Prompt, Reedline, Signal};

pub struct Editor {
    editor: Reedline,
    prompt: KeypadPrompt,
}

impl Default for Editor {
    fn default() -> Self {
        use reedline::Vi;

        let edit_mode = Vi::default();

        let editor = Reedline::create().with_edit_mode(Box::new(edit_mode));
        let prompt = KeypadPrompt::default();

        Self { editor, prompt }
    }
}

pub enum EditorRead {
    Read(String),
    Break,
    Continue,
}

impl Editor {
    /// Reads the next line of key presses, showing `screen` in the prompt.
    pub fn read(&mut self, screen: &str) -> std::io::Result<EditorRead> {
        self.prompt.screen.clear();
        self.prompt.screen.push_str(screen);

        match self.editor.read_line(&self.prompt)? {
            Signal::Success(input) if input.trim().is_empty() => Ok(EditorRead::Continue),
            Signal::Success(input) => Ok(EditorRead::Read(input)),
            Signal::CtrlC | Signal::CtrlD => Ok(EditorRead::Break),
        }
    }
}

/// Shows the calculator screen ahead of the cursor: `[2+3] `.
#[derive(Default)]
pub struct KeypadPrompt {
    screen: String,
}

impl Prompt for KeypadPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(format!("[{}] ", self.screen))
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: reedline::PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(".. ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: reedline::PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Owned(format!("[search: {}] ", history_search.term))
    }
}
