//! TUIのイベントループ、画面の入退場、バックグラウンドイベントの反映。

mod handlers;
mod render;
mod view;

use anyhow::Result;
use crossterm::event::{self, Event};
use std::{path::PathBuf, time::Duration};
use tokio::sync::mpsc;

use crate::{
    catalog::{self, Asset, Template},
    config::Config,
    events::AppEvent,
    grounding, i18n,
    modal::Modal,
    nav::{NavState, Screen},
    progress::{self, TaskHandle, ViewTasks},
    shortcuts::Shortcuts,
    ui::Tui,
};

use handlers::{handle_key, is_ctrl_c};
use render::draw;
use view::{LegalState, LegalView, ViewState, legal_page_for};

/// 入力処理と描画で共有するアプリ状態。
pub struct App {
    /// メモリ上の設定。
    pub cfg: Config,
    /// ショートカットキー設定。
    pub shortcuts: Shortcuts,
    /// ナビゲーションと共有データ。
    pub nav: NavState,
    /// 画面ごとのローカル状態。
    pub view: ViewState,
    /// テンプレートカタログ。
    pub templates: Vec<Template>,
    /// プロフィール画面の候補アバター。
    pub avatars: Vec<String>,
    /// 現在の画面が持つタイマー類。画面を離れると破棄する。
    pub tasks: ViewTasks,
    /// 最後に初期化した画面。
    entered: Option<Screen>,
    /// バックグラウンドタスクへ渡す送信側。
    pub event_tx: mpsc::Sender<AppEvent>,
    /// バックグラウンドタスクからの受信側。
    pub event_rx: mpsc::Receiver<AppEvent>,
    /// 規約ページ取得用のHTTPクライアント。
    pub http: reqwest::Client,
    /// 画面下部のステータス文言。
    pub status: String,
}

impl App {
    /// 設定とショートカットからアプリ状態を組み立てる。
    pub fn new(cfg: Config, shortcuts: Shortcuts) -> Result<Self> {
        // タイマーと取得タスクが共有するイベントチャネル。
        let (event_tx, event_rx) = mpsc::channel::<AppEvent>(256);
        // タイムアウト付きのHTTPクライアントを作る。
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.grounding.timeout_secs))
            .build()?;

        let nav = NavState::new(
            catalog::mock_assets(),
            cfg.ui.locale.clone(),
            cfg.ui.dark_mode,
            cfg.ui.avatar_url.clone(),
        );
        let status = i18n::t(&nav.locale, "status_ready").to_string();

        Ok(Self {
            cfg,
            shortcuts,
            nav,
            view: ViewState::default(),
            templates: catalog::templates(),
            avatars: catalog::recommended_avatars(),
            tasks: ViewTasks::default(),
            entered: None,
            event_tx,
            event_rx,
            http,
            status,
        })
    }

    /// ロケールに応じた文字列を返す。
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        i18n::t(&self.nav.locale, key)
    }

    /// 画面が変わっていれば旧画面を破棄し、新画面を初期化する。
    pub fn sync_view(&mut self) {
        // 入場処理がリダイレクトすることがあるので落ち着くまで繰り返す。
        while self.entered != Some(self.nav.screen) {
            let screen = self.nav.screen;
            self.enter_screen(screen);
        }
    }

    /// 画面に入ったときの初期化とタイマー起動。
    fn enter_screen(&mut self, screen: Screen) {
        // 旧画面のタイマーを全て止める。
        self.tasks.cancel_all();
        self.view.modal = None;
        self.view.legal = None;
        self.view.upload = Default::default();
        self.entered = Some(screen);
        tracing::debug!("enter screen {:?}", screen);

        match screen {
            Screen::Splash => {
                // 一定時間後にライブラリへ移る。
                self.tasks.push(progress::spawn_after(
                    "splash",
                    self.cfg.timing.splash(),
                    AppEvent::SplashElapsed,
                    self.event_tx.clone(),
                ));
            }
            Screen::Library => {
                // テンプレートごとに疑似ダウンロードを開始する。
                self.view.library = Default::default();
                for tpl in &self.templates {
                    self.view.library.sync.insert(tpl.id.clone(), 0.0);
                    let id = tpl.id.clone();
                    self.tasks.push(progress::spawn_progress(
                        "template-sync",
                        &self.cfg.timing,
                        self.event_tx.clone(),
                        move |percent| AppEvent::TemplateSync {
                            template_id: id.clone(),
                            percent,
                        },
                    ));
                }
            }
            Screen::Assets => {
                self.view.assets = Default::default();
            }
            Screen::ResultDetail => {
                // 対象が無ければ一覧へ戻す。
                if self.nav.current_asset().is_none() {
                    tracing::warn!("result detail without asset, redirecting");
                    self.nav.back();
                }
            }
            Screen::Profile => {
                self.view.profile_pending = self
                    .avatars
                    .iter()
                    .position(|a| *a == self.nav.avatar_url)
                    .unwrap_or(0);
            }
            Screen::Pro => {
                self.view.pro_selected = catalog::DEFAULT_PACKAGE;
            }
            Screen::Language => {
                self.view.language_selected = catalog::LANGUAGES
                    .iter()
                    .position(|l| l.value == self.nav.locale)
                    .unwrap_or(0);
            }
            Screen::PrivacyPolicy | Screen::UserAgreement => {
                if let Some(page) = legal_page_for(screen) {
                    self.view.legal = Some(LegalView::new(page));
                    let handle = self.spawn_legal_fetch(page);
                    self.tasks.push(handle);
                }
            }
            Screen::Upload | Screen::Settings | Screen::ContactUs | Screen::AboutUs => {}
        }
    }

    /// 規約要約をバックグラウンドで取得する。
    fn spawn_legal_fetch(&self, page: grounding::LegalPage) -> TaskHandle {
        let http = self.http.clone();
        let cfg = self.cfg.grounding.clone();
        let tx = self.event_tx.clone();
        let default_title = self.t("grounding_default_source").to_string();
        TaskHandle::spawn("grounding", async move {
            let result = grounding::fetch(&http, &cfg, page, &default_title)
                .await
                .map_err(|e| {
                    tracing::error!("grounding failed: {e:#}");
                    e.to_string()
                });
            let _ = tx.send(AppEvent::LegalLoaded { page, result }).await;
        })
    }

    /// バックグラウンドイベントをUI状態へ反映する。
    pub fn handle_event(&mut self, ev: AppEvent) {
        match ev {
            AppEvent::TemplateSync {
                template_id,
                percent,
            } => {
                // ライブラリを離れた後に届いた進捗は捨てる。
                if self.nav.screen == Screen::Library {
                    self.view.library.sync.insert(template_id, percent);
                }
            }
            AppEvent::SplashElapsed => {
                self.nav.complete_splash();
            }
            AppEvent::GenerationFinished => {
                if self.nav.screen == Screen::Upload && self.view.upload.generating {
                    self.finish_generation();
                }
            }
            AppEvent::LegalLoaded { page, result } => {
                // 表示中のページ宛ての結果だけを反映する。
                let Some(legal) = self.view.legal.as_mut().filter(|l| l.page == page) else {
                    return;
                };
                legal.state = match result {
                    Ok(content) => LegalState::Loaded(content),
                    Err(_) => LegalState::Failed,
                };
                legal.selected_source = 0;
            }
        }
    }

    /// 生成完了：素材を追加し、完了ダイアログを出す。
    fn finish_generation(&mut self) {
        self.view.upload.generating = false;
        let template_name = match self.nav.selected_template.clone() {
            Some(tpl) => {
                let ts = chrono::Local::now().format("%H:%M").to_string();
                self.nav.add_asset(Asset::queued_from(&tpl, ts));
                tracing::info!("generation queued for template {}", tpl.id);
                tpl.name
            }
            None => String::new(),
        };
        self.view.modal = Some(Modal::GenerationSuccess { template_name });
    }
}

/// ユーザーが終了するまでメインTUIループを回す。
pub async fn run_app(terminal: &mut Tui) -> Result<()> {
    // 設定ファイルを読み込む（初回はデフォルトを生成）。
    let cfg = Config::load_or_default(&PathBuf::from("config.toml"))?;
    // ショートカット設定を読み込む（無ければデフォルト）。
    let shortcuts = Shortcuts::load_or_default(PathBuf::from("shortcut.toml"))?;

    let mut app = App::new(cfg, shortcuts)?;

    loop {
        // 画面遷移があれば入場処理を行う。
        app.sync_view();
        // 現在の状態を描画する。
        terminal.draw(|f| draw(f, &app))?;

        // 入力処理の前にタイマー/取得イベントを消化する。
        while let Ok(ev) = app.event_rx.try_recv() {
            app.handle_event(ev);
        }

        // UIの応答性確保のため短いタイムアウトで入力をポーリングする。
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(k) = event::read()?
        {
            // どの画面でもCtrl+Cで終了できるようにする。
            if is_ctrl_c(&k) {
                break;
            }
            if handle_key(&mut app, k) {
                break;
            }
        }
    }

    // 残っているタイマーを止めてから抜ける。
    app.tasks.cancel_all();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use crate::{
        catalog::AssetStatus,
        grounding::{GroundedContent, LegalPage},
        nav::{NavPayload, Tab},
    };

    fn new_app() -> App {
        App::new(Config::default(), Shortcuts::default()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_splash_timer_enters_library() {
        let mut app = new_app();
        app.sync_view();
        assert_eq!(app.tasks.len(), 1);

        // 時間を進めてスプラッシュのタイマーを発火させる。
        let ev = app.event_rx.recv().await.unwrap();
        assert!(matches!(ev, AppEvent::SplashElapsed));
        app.handle_event(ev);
        assert_eq!(app.nav.screen, Screen::Library);
        assert_eq!(app.nav.tab, Tab::Library);

        // ライブラリではテンプレートごとに進捗タスクが走る。
        app.sync_view();
        assert_eq!(app.tasks.len(), app.templates.len());
    }

    #[tokio::test(start_paused = true)]
    async fn test_library_progress_reaches_every_template() {
        let mut app = new_app();
        app.nav.complete_splash();
        app.sync_view();

        while !app.templates.iter().all(|t| app.view.library.is_loaded(&t.id)) {
            let ev = app.event_rx.recv().await.unwrap();
            app.handle_event(ev);
        }
    }

    #[tokio::test]
    async fn test_stale_progress_is_ignored() {
        let mut app = new_app();
        app.nav.complete_splash();
        app.nav.switch_tab(Tab::Settings);
        app.sync_view();

        app.handle_event(AppEvent::TemplateSync {
            template_id: "1".into(),
            percent: 50.0,
        });
        assert!(app.view.library.sync.is_empty());
    }

    #[tokio::test]
    async fn test_generation_adds_queued_asset() {
        let mut app = new_app();
        let tpl = app.templates[0].clone();
        app.nav
            .navigate(Screen::Upload, Some(NavPayload::Template(tpl.clone())));
        app.sync_view();
        app.view.upload.generating = true;

        app.handle_event(AppEvent::GenerationFinished);
        assert!(!app.view.upload.generating);
        assert_eq!(app.nav.assets.len(), 5);
        assert_eq!(app.nav.assets[0].status, AssetStatus::Queued);
        assert_eq!(app.nav.assets[0].name, tpl.name);
        assert_eq!(
            app.view.modal,
            Some(Modal::GenerationSuccess {
                template_name: tpl.name
            })
        );
    }

    #[tokio::test]
    async fn test_generation_finished_elsewhere_is_ignored() {
        let mut app = new_app();
        app.nav.complete_splash();
        app.sync_view();

        app.handle_event(AppEvent::GenerationFinished);
        assert_eq!(app.nav.assets.len(), 4);
        assert!(app.view.modal.is_none());
    }

    fn enter_key() -> KeyEvent {
        KeyEvent::new(KeyCode::Enter, KeyModifiers::empty())
    }

    fn upload_app() -> App {
        let mut app = new_app();
        let tpl = app.templates[0].clone();
        app.nav
            .navigate(Screen::Upload, Some(NavPayload::Template(tpl)));
        app.sync_view();
        app
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_timer_opens_success_modal() {
        let mut app = upload_app();
        handle_key(&mut app, enter_key());
        assert!(app.view.upload.generating);

        let ev = app.event_rx.recv().await.unwrap();
        assert!(matches!(ev, AppEvent::GenerationFinished));
        app.handle_event(ev);
        assert_eq!(app.nav.assets.len(), 5);
        assert!(matches!(
            app.view.modal,
            Some(Modal::GenerationSuccess { .. })
        ));

        // 「素材を見る」で素材タブへ移る。
        handle_key(&mut app, enter_key());
        assert_eq!(app.nav.tab, Tab::Assets);
        assert_eq!(app.nav.screen, Screen::Assets);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_screen_cancels_generation() {
        let mut app = upload_app();
        handle_key(&mut app, enter_key());
        assert!(app.view.upload.generating);
        assert_eq!(app.tasks.len(), 1);

        app.nav.back();
        app.sync_view();
        assert_eq!(app.nav.screen, Screen::Library);
        assert!(!app.view.upload.generating);

        // 生成時間を過ぎても完了イベントは届かない。
        tokio::time::sleep(app.cfg.timing.generation() * 2).await;
        while let Ok(ev) = app.event_rx.try_recv() {
            assert!(!matches!(ev, AppEvent::GenerationFinished));
            app.handle_event(ev);
        }
        assert_eq!(app.nav.assets.len(), 4);
        assert!(app.view.modal.is_none());
    }

    #[tokio::test]
    async fn test_legal_result_for_current_page_only() {
        let mut app = new_app();
        app.nav.navigate(Screen::PrivacyPolicy, None);
        app.sync_view();
        assert!(matches!(
            app.view.legal.as_ref().map(|l| &l.state),
            Some(LegalState::Loading)
        ));

        // 別ページ宛ての結果は捨てる。
        app.handle_event(AppEvent::LegalLoaded {
            page: LegalPage::Agreement,
            result: Ok(GroundedContent::default()),
        });
        assert!(matches!(
            app.view.legal.as_ref().map(|l| &l.state),
            Some(LegalState::Loading)
        ));

        app.handle_event(AppEvent::LegalLoaded {
            page: LegalPage::Privacy,
            result: Err("offline".into()),
        });
        assert!(matches!(
            app.view.legal.as_ref().map(|l| &l.state),
            Some(LegalState::Failed)
        ));
    }
}
