use crate::services::history_service::HistoryController;

/// Page sizes offered in the help text
pub const PAGE_SIZE_OPTIONS: [u32; 10] = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

pub fn execute(controller: &HistoryController) -> String {
    let sizes: Vec<String> = PAGE_SIZE_OPTIONS.iter().map(|s| s.to_string()).collect();
    let networks = controller.explorers().table().networks().join(", ");

    format!(
        "Commands\n\
         \x20 first | f          go to the first page\n\
         \x20 prev  | p          previous page\n\
         \x20 next  | n          next page\n\
         \x20 last  | l          go to the last page\n\
         \x20 reload | r         fetch the current page again\n\
         \x20 size <n>           rows per page ({})\n\
         \x20 open <row> <field> open a hash or address in its block explorer\n\
         \x20                    field: from-hash, from-address, to-address, to-hash\n\
         \x20 help               show this message\n\
         \x20 quit | q           exit\n\
         \n\
         Explorers configured for: {}",
        sizes.join(", "),
        networks
    )
}
