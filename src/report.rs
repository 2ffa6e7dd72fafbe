// Per-round metrics handed to a reporting sink.

use std::convert::Infallible;

/// Metrics of the graph at the end of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    pub round: u32,

    /// Number of edges joining nodes of different colors.
    pub edge_cut: usize,

    /// Swaps performed since the start of the run.
    pub number_of_swaps: u64,

    /// Nodes whose color differs from their initial color.
    pub migrations: usize,
}

/// Receives one [`RoundReport`] per round.
///
/// Sinks own any durable format. An error aborts the run; swaps already
/// applied stay applied.
pub trait ReportSink {
    type Error: std::error::Error + Send + Sync + 'static;

    fn report(&mut self, report: &RoundReport) -> Result<(), Self::Error>;
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    type Error = S::Error;

    fn report(&mut self, report: &RoundReport) -> Result<(), Self::Error> {
        (**self).report(report)
    }
}

/// Discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ReportSink for NullSink {
    type Error = Infallible;

    fn report(&mut self, _report: &RoundReport) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Keeps every report in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub reports: Vec<RoundReport>,
}

impl ReportSink for MemorySink {
    type Error = Infallible;

    fn report(&mut self, report: &RoundReport) -> Result<(), Self::Error> {
        self.reports.push(*report);
        Ok(())
    }
}
