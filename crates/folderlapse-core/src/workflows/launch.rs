use crate::core::args::build_argument_list;
use crate::core::models::params::ParameterSet;
use crate::engine::collaborators::{FolderPicker, Prompter, Renderer};
use crate::engine::config::ResolverConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::resolver::{ParameterResolver, Resolution};
use crate::engine::session::{FAILURE_STATUS, Session, SessionState};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The user dismissed the folder picker.
    Cancelled,
    /// The renderer ran to completion.
    Completed {
        exit_code: i32,
        parameters: ParameterSet,
        arguments: Vec<String>,
    },
}

impl LaunchOutcome {
    fn final_state(&self) -> SessionState {
        match self {
            LaunchOutcome::Cancelled => SessionState::Cancelled,
            LaunchOutcome::Completed { exit_code, .. } => SessionState::Completed(*exit_code),
        }
    }

    /// Process exit status, following the session's terminal-state rule.
    pub fn exit_status(&self) -> i32 {
        self.final_state().exit_status().unwrap_or(FAILURE_STATUS)
    }
}

#[instrument(skip_all, name = "launch_workflow")]
pub fn run<F, P, R>(
    picker: F,
    prompter: P,
    renderer: &mut R,
    config: &ResolverConfig,
    reporter: &ProgressReporter,
) -> Result<LaunchOutcome, EngineError>
where
    F: FolderPicker,
    P: Prompter,
    R: Renderer + ?Sized,
{
    let mut session = Session::new();
    let result = drive(&mut session, picker, prompter, renderer, config, reporter);
    if result.is_err() {
        session.fail();
    }
    debug!("Session history: {:?}", session.history());
    result
}

fn drive<F, P, R>(
    session: &mut Session,
    picker: F,
    prompter: P,
    renderer: &mut R,
    config: &ResolverConfig,
    reporter: &ProgressReporter,
) -> Result<LaunchOutcome, EngineError>
where
    F: FolderPicker,
    P: Prompter,
    R: Renderer + ?Sized,
{
    let mut resolver = ParameterResolver::new(picker, prompter, config.clone());
    let parameters = match resolver.resolve_in(session)? {
        Resolution::Cancelled => return Ok(LaunchOutcome::Cancelled),
        Resolution::Resolved(parameters) => parameters,
    };

    let arguments = build_argument_list(&parameters);
    debug!("Renderer arguments: {:?}", &arguments);

    reporter.report(Progress::Message(format!(
        "Rendering '{}' into {} (fps {}, window {}, overwrite {}, overlay {})",
        parameters.label(),
        parameters.output_path().display(),
        parameters.fps(),
        parameters.time_window(),
        parameters.overwrite_existing(),
        parameters.show_timestamp_overlay()
    )));
    session.advance(SessionState::Invoked)?;
    let exit_code = renderer
        .render(&parameters, &arguments)
        .map_err(EngineError::Renderer)?;
    session.advance(SessionState::Completed(exit_code))?;

    if exit_code == 0 {
        info!("Renderer finished successfully.");
    } else {
        warn!("Renderer exited with status {}.", exit_code);
    }

    Ok(LaunchOutcome::Completed {
        exit_code,
        parameters,
        arguments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::collaborators::CollaboratorError;
    use crate::engine::collaborators::fakes::{FixedPicker, RecordingRenderer, ScriptedPrompter};
    use crate::engine::config::Profile;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    struct BrokenRenderer;

    impl Renderer for BrokenRenderer {
        fn render(
            &mut self,
            _parameters: &ParameterSet,
            _arguments: &[String],
        ) -> Result<i32, CollaboratorError> {
            Err("python executable vanished".into())
        }
    }

    #[test]
    fn cancelled_picker_never_invokes_renderer() {
        let mut renderer = RecordingRenderer::exiting_with(0);
        let outcome = run(
            FixedPicker(None),
            ScriptedPrompter::default(),
            &mut renderer,
            &ResolverConfig::for_profile(Profile::Full),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(outcome, LaunchOutcome::Cancelled);
        assert_eq!(outcome.exit_status(), 0);
        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn renderer_exit_code_is_surfaced_verbatim() {
        let dir = tempdir().unwrap();
        let mut renderer = RecordingRenderer::exiting_with(3);
        let prompter = ScriptedPrompter::lines(&["12", "", "18:30", "y", "n"]);

        let outcome = run(
            FixedPicker(Some(dir.path().to_path_buf())),
            prompter,
            &mut renderer,
            &ResolverConfig::for_profile(Profile::Full),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(outcome.final_state(), SessionState::Completed(3));
        assert_eq!(outcome.exit_status(), 3);
        assert_eq!(renderer.calls.len(), 1);
        let args = &renderer.calls[0];
        assert_eq!(args[5], "12");
        assert!(args.contains(&"--overwrite".to_string()));
        assert!(args.contains(&"--no-time".to_string()));
        assert!(!args.contains(&"--time-start".to_string()));
        assert_eq!(args[args.len() - 2..], ["--time-end", "18:30"]);
    }

    #[test]
    fn progress_message_announces_rendering() {
        let dir = tempdir().unwrap();
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = messages.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p| {
            if let Progress::Message(msg) = p {
                sink.lock().unwrap().push(msg);
            }
        }));
        let mut renderer = RecordingRenderer::exiting_with(0);

        run(
            FixedPicker(Some(dir.path().to_path_buf())),
            ScriptedPrompter::lines(&["30"]).with_keys(&['N', 'Y']),
            &mut renderer,
            &ResolverConfig::for_profile(Profile::Basic),
            &reporter,
        )
        .unwrap();

        let messages = messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Rendering '"));
    }

    #[test]
    fn renderer_failure_is_reported_as_error() {
        let dir = tempdir().unwrap();
        let result = run(
            FixedPicker(Some(dir.path().to_path_buf())),
            ScriptedPrompter::lines(&["", "", "", "", ""]),
            &mut BrokenRenderer,
            &ResolverConfig::for_profile(Profile::Full),
            &ProgressReporter::new(),
        );

        assert!(matches!(result, Err(EngineError::Renderer(_))));
    }

    #[test]
    fn inaccessible_folder_never_invokes_renderer() {
        let mut renderer = RecordingRenderer::exiting_with(0);
        let result = run(
            FixedPicker(Some(PathBuf::from("/definitely/not/mounted/cam1"))),
            ScriptedPrompter::default(),
            &mut renderer,
            &ResolverConfig::for_profile(Profile::Full),
            &ProgressReporter::new(),
        );

        assert!(matches!(result, Err(EngineError::PathAccess { .. })));
        assert!(renderer.calls.is_empty());
    }
}
