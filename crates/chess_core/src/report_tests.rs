use super::*;
use std::sync::mpsc;

#[test]
fn test_channel_reporter_preserves_order() {
    let (tx, rx) = mpsc::channel();
    let mut reporter = ChannelReporter::new(tx);
    reporter.progress(50);
    reporter.info("info currmove e2e4");
    drop(reporter);

    let events: Vec<ReportEvent> = rx.iter().collect();
    assert_eq!(
        events,
        vec![
            ReportEvent::Progress(50),
            ReportEvent::Info("info currmove e2e4".to_string()),
        ]
    );
}

#[test]
fn test_channel_reporter_ignores_closed_receiver() {
    let (tx, rx) = mpsc::channel();
    drop(rx);
    let mut reporter = ChannelReporter::new(tx);
    reporter.progress(10);
    reporter.info("info string still fine");
}

#[test]
fn test_reporters_are_object_safe() {
    let mut reporters: Vec<Box<dyn Reporter>> = vec![Box::new(NullReporter), Box::new(TracingReporter)];
    for r in reporters.iter_mut() {
        r.progress(100);
        r.info("bestmove 0000");
    }
}
