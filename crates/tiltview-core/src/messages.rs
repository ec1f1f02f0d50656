//! Localized UI strings.
//!
//! The viewer itself never renders text; shells ask for strings here so the
//! wording stays identical across front ends.

use serde::{Deserialize, Serialize};

/// UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    Japanese,
    English,
}

/// Fixed labels used by the viewer's controls and dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    WindowTitle,
    OpenButton,
    ClearButton,
    RotateLeftButton,
    RotateRightButton,
    SaveButton,
    OpenDialogTitle,
    SaveDialogTitle,
    OpenFilter,
    SaveFilter,
    ErrorTitle,
    OpenPrompt,
}

impl Locale {
    /// Text for a fixed label.
    pub fn label(self, label: Label) -> &'static str {
        match self {
            Locale::Japanese => match label {
                Label::WindowTitle => "画像ビューワー",
                Label::OpenButton => "開く",
                Label::ClearButton => "クリア",
                Label::RotateLeftButton => "左に回転",
                Label::RotateRightButton => "右に回転",
                Label::SaveButton => "保存",
                Label::OpenDialogTitle => "画像ファイルを開く",
                Label::SaveDialogTitle => "画像を保存",
                Label::OpenFilter => "画像ファイル (*.png *.jpg *.jpeg *.bmp *.gif)",
                Label::SaveFilter => {
                    "PNG ファイル (*.png);;JPEG ファイル (*.jpg);;BMP ファイル (*.bmp)"
                }
                Label::ErrorTitle => "エラー",
                Label::OpenPrompt => "[開く] ボタンを押下してファイルを選択してください。",
            },
            Locale::English => match label {
                Label::WindowTitle => "Image Viewer",
                Label::OpenButton => "Open",
                Label::ClearButton => "Clear",
                Label::RotateLeftButton => "Rotate Left",
                Label::RotateRightButton => "Rotate Right",
                Label::SaveButton => "Save",
                Label::OpenDialogTitle => "Open Image File",
                Label::SaveDialogTitle => "Save Image",
                Label::OpenFilter => "Image Files (*.png *.jpg *.jpeg *.bmp *.gif)",
                Label::SaveFilter => "PNG Files (*.png);;JPEG Files (*.jpg);;BMP Files (*.bmp)",
                Label::ErrorTitle => "Error",
                Label::OpenPrompt => "Press [Open] to choose an image file.",
            },
        }
    }

    /// Navigation text while an image is shown.
    pub fn showing(self, file_name: &str) -> String {
        match self {
            Locale::Japanese => format!("表示中: {}", file_name),
            Locale::English => format!("Showing: {}", file_name),
        }
    }

    /// Text next to the zoom slider.
    pub fn zoom_label(self, percent: u32) -> String {
        match self {
            Locale::Japanese => format!("拡大率: {}%", percent),
            Locale::English => format!("Zoom: {}%", percent),
        }
    }

    /// Message box text for an image that could not be decoded.
    pub fn load_error(self, file_name: &str, cjk_path: bool) -> String {
        let mut message = match self {
            Locale::Japanese => format!("画像 '{}' を読み込むことができません。\n", file_name),
            Locale::English => format!("Cannot load image '{}'.\n", file_name),
        };
        if cjk_path {
            message.push_str(match self {
                Locale::Japanese => "ファイル名もしくはパスに日本語が含まれている可能性があります。",
                Locale::English => "The file name or path may contain Japanese characters.",
            });
        }
        message
    }
}
