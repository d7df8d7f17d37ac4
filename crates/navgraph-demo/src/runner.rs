#![forbid(unsafe_code)]

//! Replays parsed script lines through a [`StepShell`].

use core::time::Duration;

use navgraph::web::step_shell::ShellError;
use navgraph::{
    BackOutcome, BridgeConfig, ContextConfig, DispatchView, EngineConfig, NavigationNode,
    ScreenDispatcher, ScreenState, ShellEvent, StepShell, TabKind,
};
use serde::Serialize;
use tracing::debug;

use crate::script::{Command, Line};

/// Built-in tour used when no script is given.
pub const DEFAULT_TOUR: &str = include_str!("../scripts/tour.nav");

/// Renders a view as one text line.
#[derive(Debug, Default)]
pub struct TextDispatcher;

impl ScreenDispatcher for TextDispatcher {
    type Output = String;

    fn dispatch(&mut self, view: DispatchView<'_>) -> String {
        let mut line = match view.node {
            Some(node) => format!("[{}] {} ({})", view.tab, node.screen(), node.id()),
            None => format!("[{}] tab root", view.tab),
        };
        if view.can_go_back {
            line.push_str(" <back");
        }
        if view.hide_bottom_nav {
            line.push_str(" (bottom nav hidden)");
        }
        line
    }
}

/// What happened on one script line.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub line: usize,
    pub command: String,
    /// Bridge outcome of a `back`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    /// Frame rendered after the command, if the view changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub toasts: Vec<String>,
    pub depth: usize,
    pub tab: TabKind,
    /// Current node, captured by `state`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<NavigationNode>,
    pub exited: bool,
}

/// Build the shell configuration for the demo on top of `bridge`.
#[must_use]
pub fn context_config(
    bridge: BridgeConfig,
    tab: TabKind,
    exit_window_ms: Option<u64>,
    auto_hide_nav: bool,
) -> ContextConfig {
    let bridge = match exit_window_ms {
        Some(ms) => bridge.with_exit_window(Duration::from_millis(ms)),
        None => bridge,
    };
    ContextConfig::default()
        .with_engine(EngineConfig::default().with_initial_tab(tab))
        .with_bridge(bridge)
        .with_auto_hide_bottom_nav(auto_hide_nav)
}

/// Script runner over the browser shell adapter.
pub struct Runner {
    shell: StepShell<TextDispatcher>,
}

impl Runner {
    /// Mount the shell; the root frame is available via [`Runner::take_frame`].
    pub fn new(config: ContextConfig) -> Result<Self, ShellError> {
        let mut shell = StepShell::new(config, TextDispatcher);
        shell.init()?;
        Ok(Self { shell })
    }

    /// Most recent rendered frame not yet reported.
    pub fn take_frame(&mut self) -> Option<String> {
        self.shell.take_outputs().frames.pop()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shell.is_running()
    }

    #[must_use]
    pub fn shell(&self) -> &StepShell<TextDispatcher> {
        &self.shell
    }

    /// Execute every line, stopping after a confirmed exit.
    pub fn run(&mut self, lines: &[Line]) -> Result<Vec<Report>, ShellError> {
        let mut reports = Vec::with_capacity(lines.len());
        for line in lines {
            if !self.is_running() {
                debug!(line = line.number, "shell exited; skipping remaining lines");
                break;
            }
            reports.push(self.run_line(line)?);
        }
        Ok(reports)
    }

    pub fn run_line(&mut self, line: &Line) -> Result<Report, ShellError> {
        match &line.command {
            Command::Nav(screen) => self
                .shell
                .push_event(ShellEvent::Navigate(screen.clone(), None)),
            Command::Scroll(offset) => self.patch(ScreenState::new().with_scroll(*offset)),
            Command::Tab(index) => self.patch(ScreenState::new().with_selected_tab(*index)),
            Command::Filter(text) => self.patch(ScreenState::new().with_filter(text.clone())),
            Command::Set(key, value) => {
                self.patch(ScreenState::new().with_extra(key.clone(), value.clone()));
            }
            Command::Back => self.shell.push_event(ShellEvent::PopState),
            Command::Wait(dt) => self.shell.advance_time(*dt),
            Command::Switch(tab) => self.shell.push_event(ShellEvent::SwitchTab(*tab)),
            Command::HideNav(hide) => self.shell.push_event(ShellEvent::SetHideBottomNav(*hide)),
            Command::State => {}
        }

        self.shell.step()?;
        let mut outputs = self.shell.take_outputs();
        let engine = self.shell.context().engine();
        let node = match line.command {
            Command::State => engine.current_node().cloned(),
            _ => None,
        };

        Ok(Report {
            line: line.number,
            command: line.text.clone(),
            outcome: outputs.outcomes.pop().map(describe),
            frame: outputs.frames.pop(),
            toasts: outputs.toasts.into_iter().map(|t| t.message).collect(),
            depth: engine.depth(),
            tab: engine.origin_tab(),
            node,
            exited: !self.shell.is_running(),
        })
    }

    fn patch(&mut self, patch: ScreenState) {
        self.shell.push_event(ShellEvent::UpdateState(patch));
    }
}

fn describe(outcome: BackOutcome) -> String {
    match outcome {
        BackOutcome::Popped { to } => format!("popped to {to}"),
        BackOutcome::CloseStack { tab } => format!("closed stack, back to {tab} root"),
        BackOutcome::ExitSuppressed { until } => {
            format!("exit suppressed until {}ms", until.as_millis())
        }
        BackOutcome::Exit => "exit".to_string(),
    }
}

/// Human-readable rendering of one report.
#[must_use]
pub fn format_report(report: &Report) -> String {
    let mut out = format!("{:>3}  {}", report.line, report.command);
    if let Some(outcome) = &report.outcome {
        out.push_str(&format!("\n     -> {outcome}"));
    }
    for toast in &report.toasts {
        out.push_str(&format!("\n     toast: {toast}"));
    }
    if let Some(frame) = &report.frame {
        out.push_str(&format!("\n     {frame}"));
    }
    if let Some(node) = &report.node {
        match node.state() {
            Some(state) => out.push_str(&format!("\n     state: {state:?}")),
            None => out.push_str("\n     state: (none)"),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script;
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> Vec<Report> {
        let lines = script::parse(source).unwrap();
        let config = context_config(BridgeConfig::default(), TabKind::Home, None, false);
        let mut runner = Runner::new(config).unwrap();
        assert_eq!(runner.take_frame().as_deref(), Some("[home] tab root"));
        runner.run(&lines).unwrap()
    }

    #[test]
    fn default_tour_parses_and_runs() {
        let lines = script::parse(DEFAULT_TOUR).unwrap();
        assert!(!lines.is_empty());
        let config = context_config(BridgeConfig::default(), TabKind::Home, Some(2000), true);
        let mut runner = Runner::new(config).unwrap();
        let reports = runner.run(&lines).unwrap();
        assert_eq!(reports.len(), lines.len());

        let by_line = |n: usize| reports.iter().find(|r| r.line == n).unwrap();

        // Two backs from the comment thread land on the scrolled profile.
        let state = by_line(13).node.as_ref().and_then(|n| n.state()).unwrap();
        assert_eq!(state.scroll_offset, Some(640));
        assert_eq!(state.selected_tab, Some(1));
        assert_eq!(by_line(13).depth, 0);

        assert!(by_line(14).frame.as_deref().unwrap().contains("(bottom nav hidden)"));
        assert_eq!(by_line(17).tab, TabKind::Explore);
        assert_eq!(
            by_line(20).outcome.as_deref(),
            Some("closed stack, back to explore root")
        );
        assert_eq!(by_line(21).outcome.as_deref(), Some("exit suppressed until 2000ms"));
        assert_eq!(by_line(23).outcome.as_deref(), Some("exit suppressed until 4500ms"));

        let last = reports.last().unwrap();
        assert_eq!(last.line, 25);
        assert_eq!(last.outcome.as_deref(), Some("exit"));
        assert!(last.exited);
        assert!(!runner.is_running());
    }

    #[test]
    fn screen_kind_labels_are_kebab_case() {
        assert!(script::parse("nav post-detail p1").is_ok());
        assert!(script::parse("nav post p1").is_err());
    }

    #[test]
    fn back_restores_scroll() {
        let reports = run("nav profile alice\nscroll 640\nnav post-detail p1\nback\nstate");
        assert_eq!(reports.len(), 5);
        assert_eq!(reports[3].outcome.as_deref(), Some("popped to nav-1"));
        assert_eq!(reports[3].depth, 0);
        let state = reports[4].node.as_ref().and_then(|n| n.state()).unwrap();
        assert_eq!(state.scroll_offset, Some(640));
    }

    #[test]
    fn double_back_at_root_exits_and_stops() {
        let reports = run("back\nwait 300\nback\nnav settings");
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].toasts, vec!["Press back again to exit".to_string()]);
        assert_eq!(reports[2].outcome.as_deref(), Some("exit"));
        assert!(reports[2].exited);
    }

    #[test]
    fn switch_tab_resets_stack() {
        let reports = run("nav profile alice\nnav post-detail p1\nswitch reels");
        let last = reports.last().unwrap();
        assert_eq!(last.tab, TabKind::Reels);
        assert_eq!(last.depth, 0);
        assert_eq!(last.frame.as_deref(), Some("[reels] tab root"));
    }

    #[test]
    fn report_serializes_without_empty_fields() {
        let reports = run("nav settings");
        let json = serde_json::to_value(&reports[0]).unwrap();
        assert_eq!(json["command"], "nav settings");
        assert_eq!(json["tab"], "Home");
        assert!(json.get("outcome").is_none());
        assert!(json.get("toasts").is_none());
    }
}
