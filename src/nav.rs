//! 画面遷移と選択中エンティティを保持するナビゲーション状態。

use crate::catalog::{Asset, Template};

/// 現在表示中の画面。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    /// 起動スプラッシュ。
    Splash,
    /// テンプレート一覧（タブのルート）。
    Library,
    /// 写真アップロードと生成開始。
    Upload,
    /// 素材一覧（タブのルート）。
    Assets,
    /// 設定（タブのルート）。
    Settings,
    /// プロフィール（アバター選択）。
    Profile,
    /// コイン購入。
    Pro,
    /// 言語選択。
    Language,
    /// 生成結果の詳細。
    ResultDetail,
    /// プライバシーポリシー（検索要約）。
    PrivacyPolicy,
    /// 利用規約（検索要約）。
    UserAgreement,
    /// お問い合わせ。
    ContactUs,
    /// アプリについて。
    AboutUs,
}

impl Screen {
    /// 「戻る」で遷移する固定の親画面。タブのルートとスプラッシュは親を持たない。
    pub fn back_target(self) -> Option<Screen> {
        match self {
            Screen::Splash | Screen::Library | Screen::Assets | Screen::Settings => None,
            Screen::Upload => Some(Screen::Library),
            Screen::ResultDetail => Some(Screen::Assets),
            Screen::Profile
            | Screen::Pro
            | Screen::Language
            | Screen::PrivacyPolicy
            | Screen::UserAgreement
            | Screen::ContactUs
            | Screen::AboutUs => Some(Screen::Settings),
        }
    }

    /// 下部タブバーを表示する画面かどうか。
    pub fn shows_tab_bar(self) -> bool {
        matches!(
            self,
            Screen::Library
                | Screen::Assets
                | Screen::Settings
                | Screen::Profile
                | Screen::ResultDetail
        )
    }
}

/// 下部ナビゲーションのタブ。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Library,
    Assets,
    Settings,
}

impl Tab {
    /// 表示順のタブ一覧。
    pub const ALL: [Tab; 3] = [Tab::Library, Tab::Assets, Tab::Settings];

    /// タブに対応するルート画面。
    pub fn root_screen(self) -> Screen {
        match self {
            Tab::Library => Screen::Library,
            Tab::Assets => Screen::Assets,
            Tab::Settings => Screen::Settings,
        }
    }
}

/// `navigate` に添える選択対象。
#[derive(Clone, Debug)]
pub enum NavPayload {
    Template(Template),
    Asset(Asset),
}

/// アプリ全体で唯一の可変な共有状態。
#[derive(Clone, Debug)]
pub struct NavState {
    pub screen: Screen,
    pub tab: Tab,
    /// アップロード画面で使うテンプレート。
    pub selected_template: Option<Template>,
    /// 詳細画面で使う素材ID。
    pub selected_asset_id: Option<String>,
    pub dark_mode: bool,
    pub locale: String,
    pub avatar_url: String,
    pub assets: Vec<Asset>,
}

impl NavState {
    /// スプラッシュ画面・ライブラリタブから始まる状態を作る。
    pub fn new(assets: Vec<Asset>, locale: String, dark_mode: bool, avatar_url: String) -> Self {
        Self {
            screen: Screen::Splash,
            tab: Tab::Library,
            selected_template: None,
            selected_asset_id: None,
            dark_mode,
            locale,
            avatar_url,
            assets,
        }
    }

    /// 画面を切り替え、ペイロードがあれば選択状態を更新する。
    pub fn navigate(&mut self, screen: Screen, payload: Option<NavPayload>) {
        // 画面を切り替える前に選択を確定させる。
        match payload {
            Some(NavPayload::Template(t)) => self.selected_template = Some(t),
            Some(NavPayload::Asset(a)) => self.selected_asset_id = Some(a.id),
            None => {}
        }
        tracing::debug!("navigate {:?} -> {:?}", self.screen, screen);
        self.screen = screen;
    }

    /// タブを切り替え、対応するルート画面を表示する。
    pub fn switch_tab(&mut self, tab: Tab) {
        tracing::debug!("switch tab {:?}", tab);
        self.tab = tab;
        self.screen = tab.root_screen();
    }

    /// 固定の親画面へ戻る。親が無ければ何もしない。
    pub fn back(&mut self) {
        if let Some(parent) = self.screen.back_target() {
            self.navigate(parent, None);
        }
    }

    /// スプラッシュ終了後はライブラリタブへ移る。
    pub fn complete_splash(&mut self) {
        if self.screen == Screen::Splash {
            self.switch_tab(Tab::Library);
        }
    }

    /// 指定IDの素材のお気に入りを反転する。
    pub fn toggle_favorite(&mut self, asset_id: &str) {
        if let Some(a) = self.assets.iter_mut().find(|a| a.id == asset_id) {
            a.is_favorited = !a.is_favorited;
        }
    }

    /// 指定IDの素材を削除し、削除したかどうかを返す。
    pub fn delete_asset(&mut self, asset_id: &str) -> bool {
        let before = self.assets.len();
        self.assets.retain(|a| a.id != asset_id);
        before != self.assets.len()
    }

    /// 新しく生成を始めた素材を先頭に追加する。
    pub fn add_asset(&mut self, asset: Asset) {
        self.assets.insert(0, asset);
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn set_language(&mut self, locale: &str) {
        self.locale = locale.to_string();
    }

    pub fn set_avatar(&mut self, url: String) {
        self.avatar_url = url;
    }

    /// 選択中の素材。削除済みや未選択ならNone。
    pub fn current_asset(&self) -> Option<&Asset> {
        let id = self.selected_asset_id.as_deref()?;
        self.assets.iter().find(|a| a.id == id)
    }
}
