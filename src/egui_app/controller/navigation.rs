use tracing::info;

use super::*;

impl ViewerController {
    pub fn next_page(&mut self) -> bool {
        let moved = self.paginator.next_page();
        if moved {
            self.page_changed();
        }
        moved
    }

    pub fn previous_page(&mut self) -> bool {
        let moved = self.paginator.previous_page();
        if moved {
            self.page_changed();
        }
        moved
    }

    /// Jump to a 0-based page; out-of-range pages are ignored.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let moved = self.paginator.go_to_page(page);
        if moved {
            self.page_changed();
        }
        moved
    }

    /// Clear the one-shot scroll request once the renderer has honoured it.
    pub fn take_scroll_to_top(&mut self) -> bool {
        std::mem::take(&mut self.ui.scroll_to_top_requested)
    }

    fn page_changed(&mut self) {
        self.rebuild_page();
        info!(
            "Showing page {} of {}",
            self.paginator.current_page() + 1,
            self.paginator.total_pages()
        );
    }

    /// Tear down the previous page's cards and register the current page.
    pub(super) fn rebuild_page(&mut self) {
        self.card_audio.teardown();
        for index in self.paginator.bounds() {
            let sources = self.sources_for(index);
            let element = self.media.create_element();
            self.card_audio.register(index, element, sources);
        }
        self.ui.scroll_to_top_requested = true;
    }
}
