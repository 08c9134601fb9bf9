// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvalidFieldError {
    key: String,
    expected: &'static str,
}

impl InvalidFieldError {
    pub fn new(key: impl Into<String>, expected: &'static str) -> Self {
        Self {
            key: key.into(),
            expected,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn expected(&self) -> &'static str {
        self.expected
    }
}

impl std::fmt::Display for InvalidFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid value for '{}': expected {}", self.key, self.expected)
    }
}

impl std::error::Error for InvalidFieldError {}

#[derive(Debug)]
pub enum SettingsError {
    Io(PathBuf, std::io::Error),
    Json(serde_json::Error),
    NotAnObject,
    InvalidField(InvalidFieldError),
}

impl SettingsError {
    /// True when the settings file does not exist at all.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SettingsError::Io(_, e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(path, e) => {
                write!(f, "Failed to read settings from {}: {}", path.display(), e)
            }
            SettingsError::Json(e) => write!(f, "Failed to parse settings: {}", e),
            SettingsError::NotAnObject => write!(f, "Settings root must be a JSON object"),
            SettingsError::InvalidField(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(_, e) => Some(e),
            SettingsError::Json(e) => Some(e),
            SettingsError::NotAnObject => None,
            SettingsError::InvalidField(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Json(err)
    }
}

impl From<InvalidFieldError> for SettingsError {
    fn from(err: InvalidFieldError) -> Self {
        SettingsError::InvalidField(err)
    }
}
