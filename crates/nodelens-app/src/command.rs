/// Everything a keypress can mean, after the per-view keymap has resolved
/// it. The handler decides whether the command actually changed state and
/// therefore whether a frame is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Back,
    CursorUp,
    CursorDown,
    Select,
    OpenPodSearch,
    OpenContextSelect,
    Refresh,
    ShowHostNode,
    SearchChar(char),
    SearchBackspace,
    SearchCancel,
    SearchSubmit,
}
