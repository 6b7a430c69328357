use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use nextsignalsentinel::app::{App, RunState};
use nextsignalsentinel::cli::Config;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("lock logs")).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("lock logs").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn run_with(config: Config) -> (App, CapturedLogs) {
    let logs = CapturedLogs::default();
    let mut app = App::with_log_writer(config, logs.clone());
    app.run().expect("run should succeed");
    (app, logs)
}

#[test]
fn quiet_run_logs_lifecycle_at_info() {
    let (app, logs) = run_with(Config {
        verbose: false,
        log_filter: None,
    });
    let output = logs.contents();

    assert_eq!(app.state(), &RunState::Finished);
    assert!(output.contains("starting"));
    assert!(output.contains("verbose=false"));
    assert!(output.contains("finished"));
    assert!(!output.contains("resolved configuration"));
}

#[test]
fn verbose_run_adds_debug_output() {
    let (_, logs) = run_with(Config {
        verbose: true,
        log_filter: None,
    });
    let output = logs.contents();

    assert!(output.contains("verbose=true"));
    assert!(output.contains("DEBUG"));
    assert!(output.contains("resolved configuration"));
}

#[test]
fn explicit_filter_can_silence_the_run() {
    let (app, logs) = run_with(Config {
        verbose: true,
        log_filter: Some("off".to_string()),
    });

    assert_eq!(app.state(), &RunState::Finished);
    assert!(logs.contents().is_empty());
}

#[test]
fn failed_run_writes_nothing() {
    let logs = CapturedLogs::default();
    let mut app = App::with_log_writer(
        Config {
            verbose: true,
            log_filter: Some("nextsignalsentinel=loudest".to_string()),
        },
        logs.clone(),
    );

    let error = app.run().expect_err("must fail");
    assert!(error.to_string().contains("nextsignalsentinel=loudest"));
    assert!(matches!(app.state(), RunState::Failed(_)));
    assert!(logs.contents().is_empty());
}
