//! キー入力ハンドラー関数。

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    catalog::{COIN_PACKAGES, LANGUAGES},
    events::AppEvent,
    modal::Modal,
    nav::{NavPayload, Screen, Tab},
    progress,
    shortcuts::matches_shortcut,
};

use super::{
    App,
    view::{LegalState, SettingsItem, step_down, step_up},
};

/// キー入力を1件処理し、終了すべきならtrueを返す。
pub fn handle_key(app: &mut App, k: KeyEvent) -> bool {
    // ダイアログが開いていれば最優先で処理する。
    if app.view.modal.is_some() {
        handle_modal_key(app, k);
        return false;
    }

    let g = &app.shortcuts.global;
    if matches_shortcut(&k, &g.quit) {
        return true;
    }

    // スプラッシュ中はタブや戻るを受け付けない。
    if app.nav.screen == Screen::Splash {
        return false;
    }

    // タブ切り替えと戻るは全画面共通。
    let tab = if matches_shortcut(&k, &g.tab_library) {
        Some(Tab::Library)
    } else if matches_shortcut(&k, &g.tab_assets) {
        Some(Tab::Assets)
    } else if matches_shortcut(&k, &g.tab_settings) {
        Some(Tab::Settings)
    } else {
        None
    };
    if let Some(tab) = tab {
        app.nav.switch_tab(tab);
        return false;
    }
    if matches_shortcut(&k, &g.back) {
        app.nav.back();
        return false;
    }

    // 画面ごとのハンドラへ委譲する。
    match app.nav.screen {
        Screen::Splash | Screen::ContactUs | Screen::AboutUs => {}
        Screen::Library => handle_library_key(app, k),
        Screen::Upload => handle_upload_key(app, k),
        Screen::Assets => handle_assets_key(app, k),
        Screen::ResultDetail => handle_detail_key(app, k),
        Screen::Settings => handle_settings_key(app, k),
        Screen::Profile => handle_profile_key(app, k),
        Screen::Pro => handle_pro_key(app, k),
        Screen::Language => handle_language_key(app, k),
        Screen::PrivacyPolicy | Screen::UserAgreement => handle_legal_key(app, k),
    }
    false
}

/// Ctrl+Cかどうかを判定する。
pub fn is_ctrl_c(k: &KeyEvent) -> bool {
    k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c')
}

/// テンプレート一覧のキー処理。
fn handle_library_key(app: &mut App, k: KeyEvent) {
    let sc = &app.shortcuts.list;
    let lib = &mut app.view.library;

    if matches_shortcut(&k, &sc.left) {
        // 前のカテゴリへ。選択位置は先頭に戻す。
        step_up(&mut lib.category);
        lib.selected = 0;
    } else if matches_shortcut(&k, &sc.right) {
        step_down(&mut lib.category, crate::catalog::CATEGORIES.len());
        lib.selected = 0;
    } else if matches_shortcut(&k, &sc.up) {
        step_up(&mut lib.selected);
    } else if matches_shortcut(&k, &sc.down) {
        let len = lib.visible(&app.templates).len();
        step_down(&mut lib.selected, len);
    } else if matches_shortcut(&k, &sc.select) {
        let Some(tpl) = lib.visible(&app.templates).get(lib.selected).map(|t| (*t).clone())
        else {
            return;
        };
        // ダウンロードが終わるまでは選べない。
        if !lib.is_loaded(&tpl.id) {
            app.status = app.t("label_downloading").to_string();
            return;
        }
        app.nav
            .navigate(Screen::Upload, Some(NavPayload::Template(tpl)));
    }
}

/// アップロード画面のキー処理。
fn handle_upload_key(app: &mut App, k: KeyEvent) {
    if !matches_shortcut(&k, &app.shortcuts.list.select) || app.view.upload.generating {
        return;
    }
    // 疑似生成タイマーを開始する。
    app.view.upload.generating = true;
    app.status = app.t("btn_creating").to_string();
    let handle = progress::spawn_after(
        "generation",
        app.cfg.timing.generation(),
        AppEvent::GenerationFinished,
        app.event_tx.clone(),
    );
    app.tasks.push(handle);
}

/// 素材一覧のキー処理。
fn handle_assets_key(app: &mut App, k: KeyEvent) {
    let sc = &app.shortcuts.list;
    let view = &mut app.view.assets;

    if matches_shortcut(&k, &sc.left) {
        step_up(&mut view.filter);
        view.selected = 0;
    } else if matches_shortcut(&k, &sc.right) {
        step_down(&mut view.filter, crate::catalog::ASSET_FILTERS.len());
        view.selected = 0;
    } else if matches_shortcut(&k, &sc.up) {
        step_up(&mut view.selected);
    } else if matches_shortcut(&k, &sc.down) {
        let len = view.visible(&app.nav.assets).len();
        step_down(&mut view.selected, len);
    } else if matches_shortcut(&k, &sc.select) {
        let Some(asset) = view.visible(&app.nav.assets).get(view.selected).map(|a| (*a).clone())
        else {
            return;
        };
        // 完成品と元画像だけ詳細を開ける。
        if asset.status.is_viewable() {
            app.nav
                .navigate(Screen::ResultDetail, Some(NavPayload::Asset(asset)));
        }
    } else if matches_shortcut(&k, &app.shortcuts.assets.delete)
        && let Some(asset) = view.visible(&app.nav.assets).get(view.selected)
    {
        // 削除確認ダイアログを開く。
        app.view.modal = Some(Modal::ConfirmDelete {
            asset_id: asset.id.clone(),
            asset_name: asset.name.clone(),
        });
    }
}

/// 詳細画面のキー処理。
fn handle_detail_key(app: &mut App, k: KeyEvent) {
    if matches_shortcut(&k, &app.shortcuts.detail.favorite)
        && let Some(id) = app.nav.selected_asset_id.clone()
    {
        app.nav.toggle_favorite(&id);
    }
}

/// 設定画面のキー処理。
fn handle_settings_key(app: &mut App, k: KeyEvent) {
    let sc = &app.shortcuts.list;
    if matches_shortcut(&k, &sc.up) {
        step_up(&mut app.view.settings_selected);
    } else if matches_shortcut(&k, &sc.down) {
        step_down(&mut app.view.settings_selected, SettingsItem::ALL.len());
    } else if matches_shortcut(&k, &sc.select) {
        let item = SettingsItem::ALL[app.view.settings_selected.min(SettingsItem::ALL.len() - 1)];
        match item.target() {
            Some(screen) => app.nav.navigate(screen, None),
            None => app.nav.toggle_dark_mode(),
        }
    }
}

/// プロフィール画面のキー処理。
fn handle_profile_key(app: &mut App, k: KeyEvent) {
    let sc = &app.shortcuts.list;
    if matches_shortcut(&k, &sc.up) || matches_shortcut(&k, &sc.left) {
        step_up(&mut app.view.profile_pending);
    } else if matches_shortcut(&k, &sc.down) || matches_shortcut(&k, &sc.right) {
        step_down(&mut app.view.profile_pending, app.avatars.len());
    } else if matches_shortcut(&k, &sc.select)
        && let Some(url) = app.avatars.get(app.view.profile_pending).cloned()
    {
        // 保存して設定画面へ戻る。
        app.nav.set_avatar(url);
        app.nav.back();
    }
}

/// 購入画面のキー処理。
fn handle_pro_key(app: &mut App, k: KeyEvent) {
    let sc = &app.shortcuts.list;
    if matches_shortcut(&k, &sc.up) || matches_shortcut(&k, &sc.left) {
        step_up(&mut app.view.pro_selected);
    } else if matches_shortcut(&k, &sc.down) || matches_shortcut(&k, &sc.right) {
        step_down(&mut app.view.pro_selected, COIN_PACKAGES.len());
    } else if matches_shortcut(&k, &sc.select) {
        // モックなので購入はできない。
        app.status = app.t("msg_purchase_mock").to_string();
    }
}

/// 言語画面のキー処理。
fn handle_language_key(app: &mut App, k: KeyEvent) {
    let sc = &app.shortcuts.list;
    if matches_shortcut(&k, &sc.up) {
        step_up(&mut app.view.language_selected);
    } else if matches_shortcut(&k, &sc.down) {
        step_down(&mut app.view.language_selected, LANGUAGES.len());
    } else if matches_shortcut(&k, &sc.select)
        && let Some(lang) = LANGUAGES.get(app.view.language_selected)
    {
        app.nav.set_language(lang.value);
        app.status = app.t("status_ready").to_string();
    }
}

/// 規約ページのキー処理。
fn handle_legal_key(app: &mut App, k: KeyEvent) {
    let Some(legal) = app.view.legal.as_mut() else {
        return;
    };
    let LegalState::Loaded(content) = &legal.state else {
        return;
    };
    let sc = &app.shortcuts.list;

    if matches_shortcut(&k, &sc.up) {
        step_up(&mut legal.selected_source);
    } else if matches_shortcut(&k, &sc.down) {
        step_down(&mut legal.selected_source, content.sources.len());
    } else if matches_shortcut(&k, &app.shortcuts.legal.open_source)
        && let Some(src) = content.sources.get(legal.selected_source)
        && src.uri != "#"
    {
        // 引用元をブラウザで開く。失敗してもステータスに出すだけ。
        match webbrowser::open(&src.uri) {
            Ok(()) => app.status = src.uri.clone(),
            Err(e) => {
                tracing::warn!("failed to open {}: {e}", src.uri);
                app.status = format!("{}: {e}", src.uri);
            }
        }
    }
}

/// ダイアログのキー処理。
fn handle_modal_key(app: &mut App, k: KeyEvent) {
    let sc = &app.shortcuts.modal;
    let confirmed = matches_shortcut(&k, &sc.confirm);
    if !confirmed && !matches_shortcut(&k, &sc.cancel) {
        return;
    }

    // どちらのボタンでもダイアログは閉じる。
    let Some(modal) = app.view.modal.take() else {
        return;
    };
    if !confirmed {
        return;
    }

    match modal {
        Modal::GenerationSuccess { .. } => {
            // 「素材を見る」でタブごと移動する。
            app.nav.switch_tab(Tab::Assets);
        }
        Modal::ConfirmDelete { asset_id, .. } => {
            if app.nav.delete_asset(&asset_id) {
                tracing::info!("asset deleted: {asset_id}");
            }
            let len = app.view.assets.visible(&app.nav.assets).len();
            app.view.assets.clamp(len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, shortcuts::Shortcuts};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn app_on(screen: Screen) -> App {
        let mut app = App::new(Config::default(), Shortcuts::default()).unwrap();
        app.nav.navigate(screen, None);
        app.sync_view();
        app
    }

    #[tokio::test]
    async fn test_quit_key() {
        let mut app = app_on(Screen::Library);
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))));
        assert!(is_ctrl_c(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[tokio::test]
    async fn test_splash_ignores_tab_keys() {
        let mut app = app_on(Screen::Splash);
        handle_key(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.nav.screen, Screen::Splash);
    }

    #[tokio::test]
    async fn test_tab_keys_switch_tab_and_screen() {
        let mut app = app_on(Screen::Profile);
        handle_key(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.nav.tab, Tab::Assets);
        assert_eq!(app.nav.screen, Screen::Assets);
    }

    #[tokio::test]
    async fn test_library_requires_finished_download() {
        let mut app = app_on(Screen::Library);
        let first = app.templates[0].clone();

        // 進捗0では遷移しない。
        app.view.library.sync.insert(first.id.clone(), 40.0);
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.nav.screen, Screen::Library);

        app.view.library.sync.insert(first.id.clone(), 100.0);
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.nav.screen, Screen::Upload);
        assert_eq!(app.nav.selected_template, Some(first));
    }

    #[tokio::test]
    async fn test_assets_enter_only_opens_viewable() {
        let mut app = app_on(Screen::Assets);
        // a3（生成中）は開けない。
        app.view.assets.selected = 2;
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.nav.screen, Screen::Assets);

        app.view.assets.selected = 0;
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.nav.screen, Screen::ResultDetail);
        assert_eq!(app.nav.selected_asset_id.as_deref(), Some("a1"));
    }

    #[tokio::test]
    async fn test_delete_goes_through_confirmation() {
        let mut app = app_on(Screen::Assets);
        app.view.assets.selected = 3;
        handle_key(&mut app, key(KeyCode::Char('d')));
        assert!(matches!(app.view.modal, Some(Modal::ConfirmDelete { .. })));

        // キャンセルでは消えない。
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.view.modal.is_none());
        assert_eq!(app.nav.assets.len(), 4);

        handle_key(&mut app, key(KeyCode::Char('d')));
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.nav.assets.len(), 3);
        assert!(app.nav.assets.iter().all(|a| a.id != "a4"));
        assert_eq!(app.view.assets.selected, 2);
    }

    #[tokio::test]
    async fn test_detail_favorite_toggle() {
        let mut app = app_on(Screen::Assets);
        handle_key(&mut app, key(KeyCode::Enter));
        app.sync_view();
        handle_key(&mut app, key(KeyCode::Char('f')));
        assert!(app.nav.assets[0].is_favorited);
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.nav.screen, Screen::Assets);
    }

    #[tokio::test]
    async fn test_detail_without_asset_redirects() {
        let app = app_on(Screen::ResultDetail);
        assert_eq!(app.nav.screen, Screen::Assets);
    }

    #[tokio::test]
    async fn test_settings_dark_mode_and_navigation() {
        let mut app = app_on(Screen::Settings);
        let dark = SettingsItem::ALL
            .iter()
            .position(|i| *i == SettingsItem::DarkMode)
            .unwrap();
        app.view.settings_selected = dark;
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.nav.dark_mode);
        assert_eq!(app.nav.screen, Screen::Settings);

        app.view.settings_selected = 0;
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.nav.screen, Screen::Profile);
    }

    #[tokio::test]
    async fn test_profile_save_returns_to_settings() {
        let mut app = app_on(Screen::Profile);
        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.nav.avatar_url, app.avatars[1]);
        assert_eq!(app.nav.screen, Screen::Settings);
    }

    #[tokio::test]
    async fn test_language_selection() {
        let mut app = app_on(Screen::Language);
        assert_eq!(app.view.language_selected, 0);
        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.nav.locale, "en-US");
        assert_eq!(app.status, "Ready");
    }

    #[tokio::test]
    async fn test_pro_defaults_to_second_package() {
        let app = app_on(Screen::Pro);
        assert_eq!(app.view.pro_selected, 1);
    }
}
