use crate::error::ReportError;

/// Receives notifications about a focus session's progress.
///
/// Calls are fire-and-forget: the session logs a returned error and keeps
/// going, so an implementation can never stall the timer.
pub trait SessionReporter {
    fn report_session_start(&mut self) -> Result<(), ReportError>;

    /// One second of focus time elapsed.
    fn report_focus_second(&mut self) -> Result<(), ReportError>;

    fn report_pomodoro_completed(&mut self) -> Result<(), ReportError>;

    fn report_session_end(&mut self) -> Result<(), ReportError>;
}

/// Reporter that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl SessionReporter for NullReporter {
    fn report_session_start(&mut self) -> Result<(), ReportError> {
        Ok(())
    }

    fn report_focus_second(&mut self) -> Result<(), ReportError> {
        Ok(())
    }

    fn report_pomodoro_completed(&mut self) -> Result<(), ReportError> {
        Ok(())
    }

    fn report_session_end(&mut self) -> Result<(), ReportError> {
        Ok(())
    }
}

impl<R: SessionReporter + ?Sized> SessionReporter for Box<R> {
    fn report_session_start(&mut self) -> Result<(), ReportError> {
        (**self).report_session_start()
    }

    fn report_focus_second(&mut self) -> Result<(), ReportError> {
        (**self).report_focus_second()
    }

    fn report_pomodoro_completed(&mut self) -> Result<(), ReportError> {
        (**self).report_pomodoro_completed()
    }

    fn report_session_end(&mut self) -> Result<(), ReportError> {
        (**self).report_session_end()
    }
}

impl<R: SessionReporter + ?Sized> SessionReporter for &mut R {
    fn report_session_start(&mut self) -> Result<(), ReportError> {
        (**self).report_session_start()
    }

    fn report_focus_second(&mut self) -> Result<(), ReportError> {
        (**self).report_focus_second()
    }

    fn report_pomodoro_completed(&mut self) -> Result<(), ReportError> {
        (**self).report_pomodoro_completed()
    }

    fn report_session_end(&mut self) -> Result<(), ReportError> {
        (**self).report_session_end()
    }
}
