//! Terminal stand-in for the chat reply surface.

use artpipe_core::OutputSink;

pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn say(&self, message: &str) {
        println!("{message}");
    }

    fn monitoring_say(&self, message: &str) {
        eprintln!("[monitoring] {message}");
    }

    fn snippet(&self, intro: &str, filename: &str, payload: &str) {
        println!("{intro} ({filename})\n{payload}");
    }
}
