use crate::desktop::helpers::DIALOG_CLASS;
use crate::scenario::scenario_model::{DialogMatch, Scenario, Step};

/// Tray menu command: list of file types.
pub const F_TYPE_LIST: &str = "31110";
/// Tray menu command: common settings.
pub const F_OPTION: &str = "31112";
/// Tray menu command: version information.
pub const F_ABOUT: &str = "31455";

pub const COMMON_SETTINGS_TITLE: &str = "共通設定";
pub const ABOUT_TITLE: &str = "バージョン情報";

/// Open the tray context menu, pick `command_id`, expect `dialog`, cancel it.
pub fn tray_menu_scenario(name: &str, command_id: &str, dialog: DialogMatch) -> Scenario {
    Scenario {
        name: name.to_string(),
        steps: vec![
            Step::FocusTrayIcon { icon_name: None },
            Step::ContextClickTrayIcon,
            Step::ClickMenuItem {
                command_id: command_id.to_string(),
            },
            Step::WaitForDialog { dialog },
            Step::CancelDialog,
        ],
    }
}

pub fn show_type_list() -> Scenario {
    tray_menu_scenario(
        "show_type_list",
        F_TYPE_LIST,
        DialogMatch::ClassName {
            class_name: DIALOG_CLASS.to_string(),
        },
    )
}

pub fn show_common_prop() -> Scenario {
    tray_menu_scenario(
        "show_common_prop",
        F_OPTION,
        DialogMatch::Title {
            title: COMMON_SETTINGS_TITLE.to_string(),
        },
    )
}

pub fn show_about_dialog() -> Scenario {
    tray_menu_scenario(
        "show_about_dialog",
        F_ABOUT,
        DialogMatch::Title {
            title: ABOUT_TITLE.to_string(),
        },
    )
}

/// The tray-menu suite, in execution order.
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![show_type_list(), show_common_prop(), show_about_dialog()]
}
