//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Turbo Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[session]
start_location = "http://localhost:45678"
# bridge_asset = "js/turbo_bridge.js"
# assets_dir = "/path/to/assets"   # searched before the bundled bridge script
# user_agent = "Turbo Native Rust"

[webview]
# background = "#ffffff"    # propagated to the web view when it is attached
# devtools = false

[screenshots]
# enabled = true
# min_heap_headroom = 0.10  # 0.0-1.0, free memory required before capturing

[pull_to_refresh]
# enabled = true

[logging]
# level = "info"            # trace, debug, info, warn, error

# [[destinations]]
# pattern = "/new$"
# uri = "turbo://fragment/web/modal/sheet"
# presentation = "bottom_sheet"   # push, replace, modal, bottom_sheet, none
"##
    .to_string()
}
