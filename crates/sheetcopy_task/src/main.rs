use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;

use anyhow::{Result, anyhow};
use clap::Parser;
use sheetcopy_task::cli::Cli;
use sheetcopy_task::{
    ConsoleTaskHost, EnumTaskResult, GlobCopyPrimitive, TaskHost, run_copy_task,
};
use tracing_subscriber::EnvFilter;

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!(e))
}

fn describe_panic(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        return msg.to_string();
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    "Copy task panicked".to_string()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_tracing(&cli.log_level) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let spec_task_cfg = cli.into_task_config();
    let primitive = GlobCopyPrimitive::new(spec_task_cfg.spec_cp_options.clone());
    let mut host = ConsoleTaskHost::stdout();

    let task_result = panic::catch_unwind(AssertUnwindSafe(|| {
        run_copy_task(&spec_task_cfg, &primitive, &mut host)
    }))
    .unwrap_or_else(|payload| {
        let message = describe_panic(payload.as_ref());
        tracing::error!("{message}");
        host.set_result(EnumTaskResult::Failed, &message);
        EnumTaskResult::Failed
    });

    ExitCode::from(task_result.exit_code())
}
