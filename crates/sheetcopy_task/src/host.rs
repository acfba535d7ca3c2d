//! Task-host seam: logged issues and the single terminal result.

use std::io::{self, Write};

use crate::spec::{EnumIssueType, EnumTaskResult};

/// What the orchestration host receives from a run.
pub trait TaskHost {
    /// Surface one issue (e.g. a failed row) to the host.
    fn log_issue(&mut self, issue_type: EnumIssueType, message: &str);
    /// Report the terminal result; called exactly once per run.
    fn set_result(&mut self, task_result: EnumTaskResult, message: &str);
}

/// Escape a logging-command message so it stays on one line.
pub fn escape_command_data(message: &str) -> String {
    message
        .replace('%', "%AZP25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Host speaking pipeline logging commands (`##vso[...]`) on a writer.
#[derive(Debug)]
pub struct ConsoleTaskHost<W: Write> {
    writer: W,
}

impl ConsoleTaskHost<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleTaskHost<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_command(&mut self, command: &str) {
        if let Err(e) = writeln!(self.writer, "{command}").and_then(|_| self.writer.flush()) {
            tracing::warn!("Failed to write host command ({e})");
        }
    }
}

impl<W: Write> TaskHost for ConsoleTaskHost<W> {
    fn log_issue(&mut self, issue_type: EnumIssueType, message: &str) {
        self.write_command(&format!(
            "##vso[task.logissue type={}]{}",
            issue_type.as_str(),
            escape_command_data(message)
        ));
    }

    fn set_result(&mut self, task_result: EnumTaskResult, message: &str) {
        self.write_command(&format!(
            "##vso[task.complete result={};]{}",
            task_result.as_str(),
            escape_command_data(message)
        ));
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::TaskHost;
    use crate::spec::{EnumIssueType, EnumTaskResult};

    /// In-memory host for assertions.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingTaskHost {
        pub(crate) issues: Vec<(EnumIssueType, String)>,
        pub(crate) results: Vec<(EnumTaskResult, String)>,
    }

    impl RecordingTaskHost {
        pub(crate) fn error_issue_count(&self) -> usize {
            self.issues
                .iter()
                .filter(|(issue_type, _)| *issue_type == EnumIssueType::Error)
                .count()
        }
    }

    impl TaskHost for RecordingTaskHost {
        fn log_issue(&mut self, issue_type: EnumIssueType, message: &str) {
            self.issues.push((issue_type, message.to_string()));
        }

        fn set_result(&mut self, task_result: EnumTaskResult, message: &str) {
            self.results.push((task_result, message.to_string()));
        }
    }
}
