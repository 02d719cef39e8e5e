/// Discrete operator commands, one per loop iteration at most
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCommand {
    CycleColorMap,
    ToggleCrosshair,
    ToggleHud,
    ToggleLabels,
    ToggleInfo,
    IncreaseBorder,
    DecreaseBorder,
    IncreaseScale,
    DecreaseScale,
    ToggleUnit,
    StartRecording,
    StopRecording,
    SaveStill,
    Quit,
}

impl InputCommand {
    /// Map a key character to its command; unknown keys map to `None`
    pub fn from_key(key: char) -> Option<Self> {
        let command = match key {
            'm' => InputCommand::CycleColorMap,
            'c' => InputCommand::ToggleCrosshair,
            'h' => InputCommand::ToggleHud,
            'k' => InputCommand::ToggleLabels,
            'i' => InputCommand::ToggleInfo,
            'b' => InputCommand::IncreaseBorder,
            'n' => InputCommand::DecreaseBorder,
            '+' | '=' => InputCommand::IncreaseScale,
            '-' => InputCommand::DecreaseScale,
            'w' => InputCommand::ToggleUnit,
            'r' => InputCommand::StartRecording,
            't' => InputCommand::StopRecording,
            'p' => InputCommand::SaveStill,
            'q' => InputCommand::Quit,
            _ => return None,
        };
        Some(command)
    }
}

pub const KEYMAP_HELP: &str = "keymap:
     i  | toggle information (search area outline, colormap name)
     c  | toggle crosshair
     w  | toggle temperature unit
     h  | toggle high/low points
     k  | toggle high/low point temperature labels
    b n | search area - +
    + - | display scale + -
     m  | cycle through colormaps
     p  | save frame to PNG file
    r t | record / stop
     q  | quit";
