//! ショートカット設定の管理。

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// ショートカット設定の全体。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shortcuts {
    pub global: GlobalShortcuts,
    pub list: ListShortcuts,
    pub assets: AssetsShortcuts,
    pub detail: DetailShortcuts,
    pub legal: LegalShortcuts,
    pub modal: ModalShortcuts,
}

/// どの画面でも有効なショートカット。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalShortcuts {
    pub quit: Vec<String>,
    pub back: Vec<String>,
    pub tab_library: Vec<String>,
    pub tab_assets: Vec<String>,
    pub tab_settings: Vec<String>,
}

/// 一覧・チップ選択の共通ショートカット。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListShortcuts {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub select: Vec<String>,
}

/// 素材一覧のショートカット。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsShortcuts {
    pub delete: Vec<String>,
}

/// 詳細画面のショートカット。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailShortcuts {
    pub favorite: Vec<String>,
}

/// 規約ページのショートカット。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalShortcuts {
    pub open_source: Vec<String>,
}

/// モーダルのショートカット。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalShortcuts {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
}

impl Shortcuts {
    /// TOMLから読み込み、無ければデフォルトを書き出して返す。
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            // 既存ファイルを読み込んでパースする。
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            // 初回は既定値をファイルに残して編集できるようにする。
            let shortcuts = Self::default();
            shortcuts.save(path)?;
            Ok(shortcuts)
        }
    }

    /// TOMLとして保存する。
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Shortcuts {
    fn default() -> Self {
        let keys = |ks: &[&str]| ks.iter().map(|k| k.to_string()).collect::<Vec<_>>();
        Self {
            global: GlobalShortcuts {
                quit: keys(&["q"]),
                back: keys(&["Esc", "Backspace"]),
                tab_library: keys(&["1"]),
                tab_assets: keys(&["2"]),
                tab_settings: keys(&["3"]),
            },
            list: ListShortcuts {
                up: keys(&["Up", "k"]),
                down: keys(&["Down", "j"]),
                left: keys(&["Left", "h"]),
                right: keys(&["Right", "l"]),
                select: keys(&["Enter"]),
            },
            assets: AssetsShortcuts {
                delete: keys(&["d", "Delete"]),
            },
            detail: DetailShortcuts {
                favorite: keys(&["f"]),
            },
            legal: LegalShortcuts {
                open_source: keys(&["o"]),
            },
            modal: ModalShortcuts {
                confirm: keys(&["Enter", "y"]),
                cancel: keys(&["Esc", "n"]),
            },
        }
    }
}

/// KeyEventがいずれかのショートカット文字列と一致するか判定する。
pub fn matches_shortcut(key: &KeyEvent, shortcuts: &[String]) -> bool {
    shortcuts
        .iter()
        .filter_map(|s| parse_shortcut(s))
        .any(|(mods, code)| key.modifiers == mods && key.code == code)
}

/// ショートカット文字列（例: "Ctrl+u", "a", "Enter"）を修飾キーとキーコードに分解する。
fn parse_shortcut(shortcut: &str) -> Option<(KeyModifiers, KeyCode)> {
    // 最後の要素がキー、それ以外が修飾キー。
    let mut parts: Vec<&str> = shortcut.split('+').collect();
    let key_str = parts.pop()?;

    let mut mods = KeyModifiers::empty();
    for m in parts {
        mods |= match m.to_ascii_lowercase().as_str() {
            "ctrl" => KeyModifiers::CONTROL,
            "alt" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => return None,
        };
    }

    let code = match key_str.to_ascii_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        // 単一文字は大文字小文字を区別して Char として扱う。
        _ => {
            let mut chars = key_str.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

/// 表示用にショートカット一覧を連結する。
pub fn format_keys(keys: &[String]) -> String {
    keys.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_matches_shortcut_simple_char() {
        // 単一文字の一致判定を検証する。
        let k = key(KeyCode::Char('f'));
        assert!(matches_shortcut(&k, &[String::from("f")]));
        assert!(!matches_shortcut(&k, &[String::from("F")]));
    }

    #[test]
    fn test_matches_shortcut_special_key() {
        let k = key(KeyCode::Esc);
        assert!(matches_shortcut(&k, &[String::from("Esc")]));
        assert!(matches_shortcut(&k, &[String::from("esc")]));
        assert!(!matches_shortcut(&k, &[String::from("Enter")]));
    }

    #[test]
    fn test_matches_shortcut_with_modifier() {
        // 修飾キー付きの一致判定を検証する。
        let k = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert!(matches_shortcut(&k, &[String::from("Ctrl+d")]));
        assert!(!matches_shortcut(&k, &[String::from("d")]));
    }

    #[test]
    fn test_unknown_names_never_match() {
        let k = key(KeyCode::Char('x'));
        assert!(!matches_shortcut(&k, &[String::from("Hyper+x")]));
        assert!(!matches_shortcut(&k, &[String::from("xx")]));
    }

    #[test]
    fn test_default_tab_keys() {
        // 数字キーでタブを切り替えられる。
        let sc = Shortcuts::default();
        assert!(matches_shortcut(&key(KeyCode::Char('2')), &sc.global.tab_assets));
        assert!(matches_shortcut(&key(KeyCode::Down), &sc.list.down));
        assert!(matches_shortcut(&key(KeyCode::Char('j')), &sc.list.down));
    }

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let s = toml::to_string_pretty(&Shortcuts::default()).unwrap();
        let back: Shortcuts = toml::from_str(&s).unwrap();
        assert_eq!(back.detail.favorite, vec!["f".to_string()]);
    }
}
