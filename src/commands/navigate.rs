use crate::services::history_service::HistoryController;
use crate::utils::page::PageAction;

/// Page navigation. Returns feedback when the action was a no-op.
pub fn execute(controller: &mut HistoryController, command: &str) -> Result<String, String> {
    let action = match command {
        "first" | "f" => PageAction::First,
        "prev" | "p" => PageAction::Prev,
        "next" | "n" => PageAction::Next,
        "last" | "l" => PageAction::Last,
        "reload" | "r" => PageAction::Reload,
        other => return Err(format!("Not a navigation command: {}", other)),
    };

    if controller.dispatch(action) {
        return Ok(String::new());
    }

    let state = controller.state();
    if state.loading() {
        return Ok("Still loading, try again in a moment.".to_string());
    }

    let reason = match action {
        PageAction::First | PageAction::Prev => "Already on the first page.",
        PageAction::Next | PageAction::Last => "Already on the last page.",
        _ => "Nothing to do.",
    };
    Ok(reason.to_string())
}

/// `size <n>`: any n >= 1; the usual choices are 10 to 100 in steps of 10
pub fn set_page_size(controller: &mut HistoryController, args: &[&str]) -> Result<String, String> {
    let raw = args
        .first()
        .ok_or("Usage: size <rows per page>, e.g. `size 50`".to_string())?;

    let size = raw
        .parse::<u32>()
        .map_err(|_| format!("Invalid page size '{}'. Use a whole number such as 10, 20 ... 100", raw))?;

    controller.on_page_size_change(size);
    Ok(String::new())
}
