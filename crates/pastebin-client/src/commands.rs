use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use pastebin_common::share::parse_paste_ref;
use zeroize::Zeroizing;

use crate::api_client::{ApiClient, PasteApi};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::form::PasteForm;
use crate::render::Render;
use crate::retrieval::{RetrievalController, RetrievalState};
use crate::submission::{SubmissionController, SubmissionState};

/// Options for `pb create`
#[derive(Debug, Default)]
pub struct CreateOptions {
    pub text: Vec<String>,
    pub file: Option<PathBuf>,
    pub max_views: u32,
    pub expires_in: Option<i64>,
    pub password: bool,
}

/// Pick the paste content: a file, the positional words, or stdin.
fn read_content(options: &CreateOptions) -> Result<String> {
    if let Some(path) = &options.file {
        return Ok(fs::read_to_string(path)?);
    }
    if !options.text.is_empty() {
        return Ok(options.text.join(" "));
    }
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    Ok(Zeroizing::new(rpassword::prompt_password(prompt)?))
}

pub async fn create(config: &ClientConfig, options: CreateOptions) -> Result<ExitCode> {
    let render = Render;
    let api: Arc<dyn PasteApi> = Arc::new(ApiClient::new(config));
    let mut submission = SubmissionController::new(api, config);

    let mut form = PasteForm {
        content: read_content(&options)?,
        max_views: options.max_views,
        expires_in_seconds: options.expires_in,
        ..PasteForm::default()
    };
    if options.password {
        form.password = prompt_password("Password (leave blank for none): ")?;
    }

    match submission.submit(&mut form).await {
        SubmissionState::Succeeded(paste) => {
            let url = submission.share_url().unwrap_or_default();
            render.created(&paste, &url);
            Ok(ExitCode::SUCCESS)
        }
        SubmissionState::Failed(message) => {
            render.failure(&message);
            Ok(ExitCode::FAILURE)
        }
        SubmissionState::Idle | SubmissionState::Submitting => Ok(ExitCode::FAILURE),
    }
}

pub async fn view(config: &ClientConfig, reference: &str) -> Result<ExitCode> {
    let render = Render;
    let api: Arc<dyn PasteApi> = Arc::new(ApiClient::new(config));
    let paste_id = parse_paste_ref(reference).ok();
    let mut retrieval = RetrievalController::new(api, paste_id.as_deref());

    loop {
        if let RetrievalState::Loading(phase) = retrieval.state() {
            render.loading(phase);
        }
        match retrieval.settle().await {
            RetrievalState::Loaded(paste) => {
                render.paste(&paste);
                return Ok(ExitCode::SUCCESS);
            }
            RetrievalState::Failed(message) => {
                render.failure(&message);
                return Ok(ExitCode::FAILURE);
            }
            RetrievalState::PasswordRequired { last_error } => {
                render.password_required(last_error.as_deref());
                let password = prompt_password("Password: ")?;
                if password.is_empty() {
                    render.abandoned();
                    return Ok(ExitCode::FAILURE);
                }
                retrieval.submit_password(password.as_str());
            }
            RetrievalState::Loading(_) => {}
        }
    }
}

pub fn show_config(config: &ClientConfig) -> ExitCode {
    Render.config(config);
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_from_words() {
        let options = CreateOptions {
            text: vec!["hello".into(), "world".into()],
            ..CreateOptions::default()
        };
        assert_eq!(read_content(&options).unwrap(), "hello world");
    }

    #[test]
    fn test_content_from_file_wins() {
        let path = std::env::temp_dir().join(format!("pb-content-{}.txt", std::process::id()));
        fs::write(&path, "from file\n").unwrap();
        let options = CreateOptions {
            text: vec!["ignored".into()],
            file: Some(path.clone()),
            ..CreateOptions::default()
        };
        assert_eq!(read_content(&options).unwrap(), "from file\n");
        fs::remove_file(path).unwrap();
    }
}
