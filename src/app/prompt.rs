use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url};
use std::io::{BufRead, Write};

pub const URL_PROMPT: &str = "请输入URL地址: ";
pub const SAVE_PROMPT: &str = "\n是否保存到文件? (y/n): ";
pub const FILENAME_PROMPT: &str = "请输入文件名: ";

/// Line-oriented prompts over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns `None` at end of input.
    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn ask_url(&mut self) -> Result<String> {
        let url = self
            .ask(URL_PROMPT)?
            .map(|s| s.trim().to_string())
            .ok_or_else(|| ConvertError::MissingConfigError {
                field: "url".to_string(),
            })?;
        validate_url("url", &url)?;
        Ok(url)
    }

    /// Only `y` or `Y` counts as yes.
    pub fn confirm_save(&mut self) -> Result<bool> {
        Ok(self
            .ask(SAVE_PROMPT)?
            .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y")))
    }

    pub fn ask_filename(&mut self) -> Result<String> {
        let name = self.ask(FILENAME_PROMPT)?.unwrap_or_default();
        let name = name.trim();
        validate_non_empty_string("filename", name)?;
        Ok(name.to_string())
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
