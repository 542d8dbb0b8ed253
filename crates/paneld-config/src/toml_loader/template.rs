//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# paneld configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
#
# Each panel takes a `cmd` (split on whitespace, no shell quoting) and an
# optional `cwd`. Leaving `cmd` unset uses the built-in default; set it to
# "" to disable the panel. Changes are picked up on the next check.

[panels.lock]
# cmd = "alacritty -e paneld-panel lock"
# cwd = "/home/user"

[panels.launcher]
# cmd = "alacritty -e paneld-panel launcher"

[panels.top_bar]
# cmd = "waybar -c ~/.config/waybar/top.json"

[panels.bottom_bar]
# cmd = ""

[panels.bar]
# cmd = ""

[supervisor]
# tick_interval_ms = 500   # 10-60000
# check_period = 50        # 1-100000, ticks between liveness checks

[logging]
# level = "INFO"           # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
