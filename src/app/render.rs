//! TUI描画関連の関数。

use ratatui::{
    Frame,
    prelude::*,
    widgets::{
        Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap,
    },
};

use crate::{
    catalog::{
        APP_VERSION, ASSET_FILTERS, AssetStatus, CATEGORIES, COIN_PACKAGES, LANGUAGES,
        SUPPORT_EMAIL,
    },
    layout::{self, MainLayout},
    modal,
    nav::{Screen, Tab},
    shortcuts::format_keys,
};

use super::{
    App,
    view::{LegalState, SettingsItem},
};

/// ライト/ダークの配色。
struct Palette {
    fg: Color,
    bg: Color,
    muted: Color,
    accent: Color,
    danger: Color,
    ok: Color,
}

impl Palette {
    fn new(dark: bool) -> Self {
        if dark {
            Self {
                fg: Color::Gray,
                bg: Color::Rgb(16, 22, 34),
                muted: Color::DarkGray,
                accent: Color::Rgb(19, 127, 236),
                danger: Color::LightRed,
                ok: Color::LightGreen,
            }
        } else {
            Self {
                fg: Color::Black,
                bg: Color::Rgb(246, 247, 248),
                muted: Color::Gray,
                accent: Color::Rgb(19, 127, 236),
                danger: Color::Red,
                ok: Color::Green,
            }
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// 選択行のハイライト。
    fn highlight(&self) -> Style {
        Style::default()
            .bg(self.accent)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    fn block<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(self.muted))
    }
}

/// 画面全体を描画する。
pub fn draw(f: &mut Frame, app: &App) {
    let p = Palette::new(app.nav.dark_mode);
    // 背景色を全面に敷く。
    f.render_widget(Block::default().style(p.base()), f.area());

    // スプラッシュはバー類を出さない。
    if app.nav.screen == Screen::Splash {
        draw_splash(f, app, &p);
        return;
    }

    let main = layout::create_main_layout(f.area(), app.nav.screen.shows_tab_bar());
    draw_header(f, app, &p, &main);

    // 画面ごとの本体を描画する。
    match app.nav.screen {
        Screen::Splash => {}
        Screen::Library => draw_library(f, app, &p, main.body),
        Screen::Upload => draw_upload(f, app, &p, main.body),
        Screen::Assets => draw_assets(f, app, &p, main.body),
        Screen::ResultDetail => draw_detail(f, app, &p, main.body),
        Screen::Settings => draw_settings(f, app, &p, main.body),
        Screen::Profile => draw_profile(f, app, &p, main.body),
        Screen::Pro => draw_pro(f, app, &p, main.body),
        Screen::Language => draw_language(f, app, &p, main.body),
        Screen::PrivacyPolicy | Screen::UserAgreement => draw_legal(f, app, &p, main.body),
        Screen::ContactUs => draw_contact(f, app, &p, main.body),
        Screen::AboutUs => draw_about(f, app, &p, main.body),
    }

    if let Some(area) = main.tab_bar {
        draw_tab_bar(f, app, &p, area);
    }

    // HELPバーとSTATUSバー。
    let help = Paragraph::new(help_text(app))
        .block(p.block("HELP"))
        .wrap(Wrap { trim: true });
    f.render_widget(help, main.help_bar);

    let status = format!(
        "[{:?}] {}: {} | {}",
        app.nav.screen,
        app.t("tab_assets"),
        app.nav.assets.len(),
        app.status
    );
    f.render_widget(Paragraph::new(status).block(p.block("STATUS")), main.status_bar);

    // ダイアログは最後に重ねる。
    if let Some(m) = &app.view.modal {
        modal::render_modal(f, m, &app.nav.locale, p.accent);
    }
}

/// 画面タイトルのi18nキー。
fn title_key(screen: Screen) -> &'static str {
    match screen {
        Screen::Splash => "app_name",
        Screen::Library => "tab_library",
        Screen::Upload => "upload_title",
        Screen::Assets => "tab_assets",
        Screen::Settings => "tab_settings",
        Screen::Profile => "profile_title",
        Screen::Pro => "label_pro_title",
        Screen::Language => "lang_title",
        Screen::ResultDetail => "detail_title",
        Screen::PrivacyPolicy => "privacy_title",
        Screen::UserAgreement => "agreement_title",
        Screen::ContactUs => "label_contact",
        Screen::AboutUs => "label_about",
    }
}

fn draw_header(f: &mut Frame, app: &App, p: &Palette, main: &MainLayout) {
    // 戻れる画面は「< 」を付ける。
    let back = if app.nav.screen.back_target().is_some() {
        "< "
    } else {
        ""
    };
    let line = Line::from(vec![
        Span::styled(back, Style::default().fg(p.muted)),
        Span::styled(
            app.t(title_key(app.nav.screen)),
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(
        Paragraph::new(line).block(p.block(app.t("app_name"))),
        main.header,
    );
}

fn draw_splash(f: &mut Frame, app: &App, p: &Palette) {
    let area = layout::centered_popup(f.area(), 50, 7);
    let text = vec![
        Line::from(Span::styled(
            app.t("app_name"),
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(app.t("splash_engine"), Style::default().fg(p.muted))),
    ];
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

/// チップ行（カテゴリ/フィルタ）を描画する。
fn draw_chips(f: &mut Frame, p: &Palette, area: Rect, labels: &[&str], selected: usize) {
    let mut spans = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        let style = if i == selected {
            p.highlight()
        } else {
            Style::default().fg(p.fg)
        };
        spans.push(Span::styled(format!(" {label} "), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).block(p.block("")), area);
}

/// 進捗をテキストのバーで表す。
fn progress_bar(percent: f32, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f32).round() as usize;
    let filled = filled.min(width);
    format!(
        "{}{} {:>3.0}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        percent
    )
}

fn draw_library(f: &mut Frame, app: &App, p: &Palette, area: Rect) {
    let body = layout::create_body_layout(area);
    let lib = &app.view.library;

    let labels: Vec<&str> = CATEGORIES.iter().map(|c| app.t(c.label_key)).collect();
    draw_chips(f, p, body.chips, &labels, lib.category);

    let visible = lib.visible(&app.templates);
    if visible.is_empty() {
        f.render_widget(
            Paragraph::new(app.t("label_empty")).block(p.block(app.t("tab_library"))),
            body.list,
        );
        return;
    }

    // テンプレートごとに名前・タグ・ダウンロード状況を並べる。
    let rows = visible.iter().map(|t| {
        let state = if lib.is_loaded(&t.id) {
            if t.is_dynamic {
                app.t("label_dynamic").to_string()
            } else {
                String::new()
            }
        } else {
            progress_bar(lib.progress(&t.id), 10)
        };
        Row::new(vec![t.name.clone(), t.tag.clone(), state])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(12),
            Constraint::Length(16),
        ],
    )
    .block(p.block(app.t("tab_library")))
    .row_highlight_style(p.highlight());
    let mut state = TableState::default();
    state.select(Some(lib.selected.min(visible.len() - 1)));
    f.render_stateful_widget(table, body.list, &mut state);

    // 選択中テンプレートのプレビュー。
    let preview = visible
        .get(lib.selected)
        .map(|t| {
            format!(
                "{}\n{}\n\n{}\n\n{}",
                t.name,
                t.tag,
                t.image_url,
                if lib.is_loaded(&t.id) {
                    String::new()
                } else {
                    format!("{}...", app.t("label_downloading"))
                }
            )
        })
        .unwrap_or_default();
    f.render_widget(
        Paragraph::new(preview)
            .block(p.block(""))
            .wrap(Wrap { trim: true }),
        body.preview,
    );
}

fn draw_upload(f: &mut Frame, app: &App, p: &Palette, area: Rect) {
    let mut lines = vec![Line::from(app.t("upload_hint")), Line::from("")];

    // 選択テンプレートが無ければ何も表示しない。
    if let Some(t) = &app.nav.selected_template {
        lines.push(Line::from(Span::styled(
            format!("{}  {}", t.name, t.tag),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            t.image_url.clone(),
            Style::default().fg(p.muted),
        )));
        lines.push(Line::from(""));
    }

    // 撮影ガイドの見本。
    for (key, good) in [
        ("upload_check_front", true),
        ("upload_check_dark", false),
        ("upload_check_cover", false),
    ] {
        let (mark, color) = if good { ("✓", p.ok) } else { ("✗", p.danger) };
        lines.push(Line::from(vec![
            Span::styled(format!("{mark} "), Style::default().fg(color)),
            Span::raw(app.t(key)),
        ]));
    }
    lines.push(Line::from(""));

    let button = if app.view.upload.generating {
        app.t("btn_creating")
    } else {
        app.t("btn_start")
    };
    lines.push(Line::from(Span::styled(format!("[ {button} ]"), p.highlight())));

    f.render_widget(
        Paragraph::new(lines)
            .block(p.block(app.t("upload_title")))
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// 素材状態の表示ラベル。
fn status_label(app: &App, status: AssetStatus) -> &'static str {
    let key = match status {
        AssetStatus::Completed => "label_completed",
        AssetStatus::Processing => "label_processing",
        AssetStatus::Failed => "label_failed",
        AssetStatus::Original => "label_original",
        AssetStatus::Queued => "label_queueing",
    };
    app.t(key)
}

fn draw_assets(f: &mut Frame, app: &App, p: &Palette, area: Rect) {
    let body = layout::create_body_layout(area);
    let view = &app.view.assets;

    let labels: Vec<&str> = ASSET_FILTERS.iter().map(|f| app.t(f.label_key())).collect();
    draw_chips(f, p, body.chips, &labels, view.filter);

    let visible = view.visible(&app.nav.assets);
    if visible.is_empty() {
        f.render_widget(
            Paragraph::new(app.t("label_empty")).block(p.block(app.t("tab_assets"))),
            body.list,
        );
        return;
    }

    let rows = visible.iter().map(|a| {
        let fav = if a.is_favorited { "♥" } else { "" };
        let status_style = match a.status {
            AssetStatus::Failed => Style::default().fg(p.danger),
            AssetStatus::Processing | AssetStatus::Queued => Style::default().fg(p.accent),
            _ => Style::default(),
        };
        Row::new(vec![
            Cell::from(a.name.clone()),
            Cell::from(status_label(app, a.status)).style(status_style),
            Cell::from(a.timestamp.clone()),
            Cell::from(fav),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Min(12),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(2),
        ],
    )
    .block(p.block(app.t("tab_assets")))
    .row_highlight_style(p.highlight());
    let mut state = TableState::default();
    state.select(Some(view.selected.min(visible.len() - 1)));
    f.render_stateful_widget(table, body.list, &mut state);

    // 選択中の素材のプレビュー。失敗時は再試行の案内を出す。
    let preview = visible
        .get(view.selected)
        .map(|a| {
            let note = match a.status {
                AssetStatus::Failed => app.t("label_fail_retry"),
                AssetStatus::Queued | AssetStatus::Processing => app.t("label_queueing"),
                _ => "",
            };
            format!("{}\n{}\n\n{}\n\n{}", a.name, a.timestamp, a.image_url, note)
        })
        .unwrap_or_default();
    f.render_widget(
        Paragraph::new(preview)
            .block(p.block(""))
            .wrap(Wrap { trim: true }),
        body.preview,
    );
}

fn draw_detail(f: &mut Frame, app: &App, p: &Palette, area: Rect) {
    // 対象が無ければ何も描かない（次のフレームで一覧へ戻る）。
    let Some(a) = app.nav.current_asset() else {
        return;
    };
    let mut lines = vec![
        Line::from(Span::styled(
            a.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(a.timestamp.clone(), Style::default().fg(p.muted))),
        Line::from(""),
        Line::from(a.image_url.clone()),
        Line::from(""),
    ];
    if a.is_dynamic {
        lines.push(Line::from(Span::styled(
            format!(" {} ", app.t("label_live")),
            p.highlight(),
        )));
    }
    let fav = if a.is_favorited {
        Span::styled(format!("♥ {}", app.t("label_favorited")), Style::default().fg(p.danger))
    } else {
        Span::styled(format!("♡ {}", app.t("label_not_favorited")), Style::default().fg(p.muted))
    };
    lines.push(Line::from(fav));

    f.render_widget(
        Paragraph::new(lines)
            .block(p.block(app.t("detail_title")))
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// 選択可能なリストを描画する。
fn draw_list(f: &mut Frame, p: &Palette, area: Rect, title: &str, items: Vec<ListItem>, selected: usize) {
    let len = items.len();
    let list = List::new(items)
        .block(p.block(title))
        .highlight_style(p.highlight());
    let mut state = ListState::default();
    if len > 0 {
        state.select(Some(selected.min(len - 1)));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_settings(f: &mut Frame, app: &App, p: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    // アバター行。
    f.render_widget(
        Paragraph::new(app.nav.avatar_url.clone()).block(p.block(app.t("label_profile"))),
        chunks[0],
    );

    let on_off = if app.nav.dark_mode { "label_on" } else { "label_off" };
    let items = SettingsItem::ALL
        .iter()
        .map(|item| {
            let sub = match item {
                SettingsItem::Language => app.nav.locale.clone(),
                SettingsItem::DarkMode => app.t(on_off).to_string(),
                SettingsItem::About => APP_VERSION.to_string(),
                _ => String::new(),
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<8}", app.t(item.section_key())),
                    Style::default().fg(p.muted),
                ),
                Span::raw(format!("{}  ", app.t(item.label_key()))),
                Span::styled(sub, Style::default().fg(p.muted)),
            ]))
        })
        .collect();
    draw_list(f, p, chunks[1], app.t("tab_settings"), items, app.view.settings_selected);
}

fn draw_profile(f: &mut Frame, app: &App, p: &Palette, area: Rect) {
    let items = app
        .avatars
        .iter()
        .map(|url| {
            let mark = if *url == app.nav.avatar_url { "● " } else { "  " };
            ListItem::new(format!("{mark}{url}"))
        })
        .collect();
    let title = format!("{} (Enter: {})", app.t("profile_title"), app.t("btn_save_changes"));
    draw_list(f, p, area, &title, items, app.view.profile_pending);
}

fn draw_pro(f: &mut Frame, app: &App, p: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    f.render_widget(
        Paragraph::new(app.t("label_pro_desc")).block(p.block(app.t("label_pro_title"))),
        chunks[0],
    );
    let items = COIN_PACKAGES
        .iter()
        .map(|pkg| ListItem::new(format!("{:>5} {}    {}", pkg.coins, app.t("label_coins"), pkg.price)))
        .collect();
    draw_list(f, p, chunks[1], app.t("label_coins"), items, app.view.pro_selected);
    f.render_widget(
        Paragraph::new(app.t("label_coins_note"))
            .style(Style::default().fg(p.muted))
            .block(p.block("")),
        chunks[2],
    );
}

fn draw_language(f: &mut Frame, app: &App, p: &Palette, area: Rect) {
    let items = LANGUAGES
        .iter()
        .map(|l| {
            let mark = if l.value == app.nav.locale { "● " } else { "○ " };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{mark}{}  ", l.label)),
                Span::styled(l.sub, Style::default().fg(p.muted)),
            ]))
        })
        .collect();
    draw_list(f, p, area, app.t("lang_title"), items, app.view.language_selected);
}

fn draw_legal(f: &mut Frame, app: &App, p: &Palette, area: Rect) {
    let Some(legal) = &app.view.legal else {
        return;
    };
    let heading = match app.nav.screen {
        Screen::UserAgreement => app.t("agreement_heading"),
        _ => app.t("privacy_heading"),
    };

    match &legal.state {
        LegalState::Loading => {
            let text = format!("{} ({})", app.t("grounding_loading"), legal.page.provider());
            f.render_widget(
                Paragraph::new(text)
                    .style(Style::default().fg(p.muted))
                    .block(p.block(heading)),
                area,
            );
        }
        LegalState::Failed => {
            f.render_widget(
                Paragraph::new(app.t("msg_grounding_error"))
                    .style(Style::default().fg(p.danger))
                    .block(p.block(heading))
                    .wrap(Wrap { trim: true }),
                area,
            );
        }
        LegalState::Loaded(content) => {
            let source_height = if content.sources.is_empty() {
                0
            } else {
                (content.sources.len() as u16 + 2).min(area.height / 2)
            };
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(source_height)])
                .split(area);

            let text = content
                .text
                .clone()
                .unwrap_or_else(|| app.t("msg_grounding_empty").to_string());
            f.render_widget(
                Paragraph::new(text)
                    .block(p.block(heading))
                    .wrap(Wrap { trim: true }),
                chunks[0],
            );

            if !content.sources.is_empty() {
                let items = content
                    .sources
                    .iter()
                    .map(|s| {
                        ListItem::new(Line::from(vec![
                            Span::raw(format!("{}  ", s.title)),
                            Span::styled(s.uri.clone(), Style::default().fg(p.muted)),
                        ]))
                    })
                    .collect();
                draw_list(f, p, chunks[1], app.t("grounding_sources"), items, legal.selected_source);
            }
        }
    }
}

fn draw_contact(f: &mut Frame, app: &App, p: &Palette, area: Rect) {
    let lines = vec![
        Line::from(app.t("label_contact_desc")),
        Line::from(""),
        Line::from(Span::styled(app.t("label_official_email"), Style::default().fg(p.muted))),
        Line::from(Span::styled(SUPPORT_EMAIL, Style::default().fg(p.accent))),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .block(p.block(app.t("label_contact")))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_about(f: &mut Frame, app: &App, p: &Palette, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            app.t("app_name"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(APP_VERSION, Style::default().fg(p.muted))),
        Line::from(""),
        Line::from(app.t("label_about_desc")),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(p.block(app.t("label_about")))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_tab_bar(f: &mut Frame, app: &App, p: &Palette, area: Rect) {
    let mut spans = Vec::new();
    for (i, tab) in Tab::ALL.iter().enumerate() {
        let key = match tab {
            Tab::Library => "tab_library",
            Tab::Assets => "tab_assets",
            Tab::Settings => "tab_settings",
        };
        let style = if *tab == app.nav.tab {
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(p.muted)
        };
        spans.push(Span::styled(format!("  {} {}  ", i + 1, app.t(key)), style));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(p.block("")),
        area,
    );
}

/// 現在画面に応じたヘルプ文字列を返す。
fn help_text(app: &App) -> String {
    let g = &app.shortcuts.global;
    let l = &app.shortcuts.list;
    let common = format!(
        "{}/{}/{}: tabs | {}: back | {}: quit",
        format_keys(&g.tab_library),
        format_keys(&g.tab_assets),
        format_keys(&g.tab_settings),
        format_keys(&g.back),
        format_keys(&g.quit),
    );
    let local = match app.nav.screen {
        Screen::Library | Screen::Assets => format!(
            "{}/{}: filter | {}/{}: move | {}: open",
            format_keys(&l.left),
            format_keys(&l.right),
            format_keys(&l.up),
            format_keys(&l.down),
            format_keys(&l.select),
        ) + &if app.nav.screen == Screen::Assets {
            format!(" | {}: delete", format_keys(&app.shortcuts.assets.delete))
        } else {
            String::new()
        },
        Screen::Upload => format!("{}: {}", format_keys(&l.select), app.t("btn_start")),
        Screen::ResultDetail => format!("{}: favorite", format_keys(&app.shortcuts.detail.favorite)),
        Screen::PrivacyPolicy | Screen::UserAgreement => format!(
            "{}/{}: move | {}: open link",
            format_keys(&l.up),
            format_keys(&l.down),
            format_keys(&app.shortcuts.legal.open_source),
        ),
        Screen::Settings | Screen::Profile | Screen::Pro | Screen::Language => format!(
            "{}/{}: move | {}: select",
            format_keys(&l.up),
            format_keys(&l.down),
            format_keys(&l.select),
        ),
        Screen::Splash | Screen::ContactUs | Screen::AboutUs => String::new(),
    };
    if local.is_empty() {
        common
    } else {
        format!("{local} | {common}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, shortcuts::Shortcuts};
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "░░░░   0%");
        assert_eq!(progress_bar(50.0, 4), "██░░  50%");
        assert_eq!(progress_bar(100.0, 4), "████ 100%");
    }

    #[tokio::test]
    async fn test_every_screen_renders() {
        // 全画面が描画でパニックしないことを確認する。
        let mut app = App::new(Config::default(), Shortcuts::default()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        for screen in [
            Screen::Splash,
            Screen::Library,
            Screen::Upload,
            Screen::Assets,
            Screen::Settings,
            Screen::Profile,
            Screen::Pro,
            Screen::Language,
            Screen::PrivacyPolicy,
            Screen::UserAgreement,
            Screen::ContactUs,
            Screen::AboutUs,
        ] {
            app.nav.navigate(screen, None);
            app.sync_view();
            terminal.draw(|f| draw(f, &app)).unwrap();
        }
    }

    #[tokio::test]
    async fn test_header_shows_localized_title() {
        let mut app = App::new(Config::default(), Shortcuts::default()).unwrap();
        app.nav.set_language("en-US");
        app.nav.switch_tab(Tab::Settings);
        app.sync_view();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Dark Mode"));
    }
}
