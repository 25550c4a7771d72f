use crate::mod_system::manifest::ModManifest;
use crate::mod_system::registry::LoadedMod;
use crate::ui_bridge::{CollectingModListUi, LogModListUi, ModListUi};

fn loaded(dir: &str) -> LoadedMod {
    LoadedMod {
        dir_name: dir.to_string(),
        manifest: ModManifest::new(dir, dir, "1.0.0"),
    }
}

#[test]
fn test_collecting_ui_keeps_each_build() {
    let mut ui = CollectingModListUi::default();
    ui.build(&[loaded("A"), loaded("B")]);

    assert_eq!(ui.builds.len(), 1);
    let dirs: Vec<&str> = ui.builds[0].iter().map(|m| m.dir_name.as_str()).collect();
    assert_eq!(dirs, vec!["A", "B"]);
}

#[test]
fn test_log_ui_accepts_empty_list() {
    let mut ui = LogModListUi;
    ui.build(&[]);
    ui.build(&[loaded("A")]);
}
