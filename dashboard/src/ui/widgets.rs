use ratatui::{
    layout::Alignment,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use qnn::decision::Verdict;

use crate::state::dashboard::{DashboardState, Focus, Status, WeightSource};

use super::theme::Theme;

fn panel(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        Theme::focused_border()
    } else {
        Theme::border()
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {title} "))
        .title_style(Theme::title())
}

pub fn header() -> Paragraph<'static> {
    let lines = vec![
        Line::from(Span::styled(
            "📡 Quantum-AI Connection Manager",
            Theme::title(),
        )),
        Line::from(Span::styled(
            "A quantum neural network decides whether a 6G client is accepted or rejected \
             based on its signal quality.",
            Theme::dim(),
        )),
    ];

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::BOTTOM).border_style(Theme::border()))
        .wrap(Wrap { trim: true })
}

pub fn client_name(state: &DashboardState, focused: bool) -> Paragraph<'_> {
    let cursor = if focused { "█" } else { "" };

    Paragraph::new(Line::from(vec![
        Span::styled(state.client_name.as_str(), Theme::text()),
        Span::styled(cursor, Theme::warn()),
    ]))
    .block(panel("Client Name", focused))
}

pub fn signal(state: &DashboardState, focused: bool) -> Gauge<'_> {
    let slider = &state.signal;
    let label = format!(
        "{:+.2}   [{:.1} noisy … clean {:.1}]",
        slider.value(),
        slider.min(),
        slider.max()
    );

    Gauge::default()
        .block(panel("Signal Strength (Noisy to Clean)", focused))
        .gauge_style(Style::default().fg(Theme::FG_DIM).bg(Theme::BG))
        .ratio(slider.ratio())
        .label(Span::styled(label, Theme::title()))
}

pub fn button(focused: bool) -> Paragraph<'static> {
    let style = if focused { Theme::warn() } else { Theme::dim() };

    Paragraph::new(Line::from(Span::styled(
        "[ Process Connection Request ]",
        style,
    )))
    .alignment(Alignment::Center)
    .block(panel("Action", focused))
}

pub fn model(state: &DashboardState) -> Paragraph<'_> {
    let source = match state.weight_source {
        WeightSource::Preset => "preset",
        WeightSource::Trained => "trained",
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("weight: ", Theme::dim()),
            Span::styled(format!("{:.4} ({source})", state.weight()), Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("requests: ", Theme::dim()),
            Span::styled(state.requests.to_string(), Theme::text()),
        ]),
    ];

    match &state.status {
        Some(Status::Info(msg)) => {
            lines.push(Line::from(Span::styled(msg.as_str(), Theme::info())));
        }
        Some(Status::Error(msg)) => {
            lines.push(Line::from(Span::styled(msg.as_str(), Theme::error())));
        }
        None => {}
    }

    Paragraph::new(lines)
        .block(panel("Quantum Brain", false))
        .wrap(Wrap { trim: true })
}

pub fn results(state: &DashboardState) -> Paragraph<'_> {
    let Some(result) = &state.result else {
        return Paragraph::new(Line::from(Span::styled(
            "No connection request processed yet.",
            Theme::muted(),
        )))
        .block(panel("Results", false));
    };

    let verdict = result.decision.verdict;
    let (mark, style) = match verdict {
        Verdict::Accept => ("✅", Theme::ok()),
        Verdict::Reject => ("❌", Theme::error()),
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("Results for {}", result.client),
            Theme::title(),
        )),
        Line::from(""),
        Line::from(Span::styled(format!("{mark} {}", verdict.headline()), style)),
        Line::from(vec![
            Span::styled("Reason: ", Theme::dim()),
            Span::styled(verdict.reason(), Theme::text()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Quantum Confidence Score: ", Theme::dim()),
            Span::styled(
                format!("{:.4}", result.decision.rounded_score()),
                Theme::title(),
            ),
            Span::styled(format!("   (signal {:+.2})", result.signal), Theme::muted()),
        ]),
    ];

    Paragraph::new(lines)
        .block(panel("Results", false))
        .wrap(Wrap { trim: true })
}

pub fn how_it_works() -> Paragraph<'static> {
    let step = |n: &'static str, what: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled(n, Theme::dim()),
            Span::styled(what, Theme::title()),
            Span::styled(text, Theme::text()),
        ])
    };

    Paragraph::new(vec![
        step("1. ", "Capture: ", "the slider simulates raw radio data."),
        step("2. ", "Quantum Logic: ", "the signal is processed by a qubit circuit."),
        step("3. ", "Action: ", "the server updates its ruleset from the output."),
    ])
    .block(panel("How it works", false))
    .wrap(Wrap { trim: true })
}

pub fn hint(focus: Focus) -> Paragraph<'static> {
    let mut spans = vec![
        Span::styled("tab", Theme::dim()),
        Span::styled("  focus    ", Theme::muted()),
    ];

    match focus {
        Focus::ClientName => spans.extend([
            Span::styled("type", Theme::dim()),
            Span::styled("  edit name    ", Theme::muted()),
            Span::styled("enter/esc", Theme::dim()),
            Span::styled("  done", Theme::muted()),
        ]),
        Focus::Signal => spans.extend([
            Span::styled("←→ / pgup pgdn", Theme::dim()),
            Span::styled("  signal    ", Theme::muted()),
            Span::styled("enter", Theme::dim()),
            Span::styled("  process    ", Theme::muted()),
        ]),
        Focus::Button => spans.extend([
            Span::styled("enter/space", Theme::dim()),
            Span::styled("  process    ", Theme::muted()),
        ]),
    }

    if focus != Focus::ClientName {
        spans.extend([
            Span::styled("t", Theme::dim()),
            Span::styled("  train    ", Theme::muted()),
            Span::styled("r", Theme::dim()),
            Span::styled("  reset    ", Theme::muted()),
            Span::styled("q", Theme::dim()),
            Span::styled("  quit", Theme::muted()),
        ]);
    }

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}
