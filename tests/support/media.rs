use std::cell::RefCell;
use std::rc::Rc;

use evalview::browse::{MediaElement, MediaHost, MediaSource, MediaState};

/// What one scripted element has been asked to do.
#[derive(Clone, Debug, Default)]
pub struct ElementLog {
    pub sources: Vec<MediaSource>,
    pub loads: usize,
    pub playing: bool,
    pub rewinds: usize,
}

/// Media host whose elements succeed instantly and log every call.
#[derive(Clone, Default)]
pub struct ScriptedMediaHost {
    pub elements: Rc<RefCell<Vec<Rc<RefCell<ElementLog>>>>>,
}

impl ScriptedMediaHost {
    pub fn created(&self) -> usize {
        self.elements.borrow().len()
    }

    pub fn playing(&self) -> usize {
        self.elements
            .borrow()
            .iter()
            .filter(|log| log.borrow().playing)
            .count()
    }

    /// Elements that had sources attached, by first source URL.
    pub fn attached_paths(&self) -> Vec<String> {
        self.elements
            .borrow()
            .iter()
            .filter_map(|log| log.borrow().sources.first().map(|s| s.url.path().to_string()))
            .collect()
    }
}

impl MediaHost for ScriptedMediaHost {
    fn create_element(&mut self) -> Box<dyn MediaElement> {
        let log = Rc::new(RefCell::new(ElementLog::default()));
        self.elements.borrow_mut().push(Rc::clone(&log));
        Box::new(ScriptedElement { log })
    }
}

struct ScriptedElement {
    log: Rc<RefCell<ElementLog>>,
}

impl MediaElement for ScriptedElement {
    fn set_sources(&mut self, sources: &[MediaSource]) {
        self.log.borrow_mut().sources = sources.to_vec();
    }

    fn load(&mut self) {
        self.log.borrow_mut().loads += 1;
    }

    fn play(&mut self) {
        self.log.borrow_mut().playing = true;
    }

    fn pause(&mut self) {
        self.log.borrow_mut().playing = false;
    }

    fn rewind(&mut self) {
        self.log.borrow_mut().rewinds += 1;
    }

    fn is_playing(&self) -> bool {
        self.log.borrow().playing
    }

    fn has_ended(&self) -> bool {
        false
    }

    fn state(&self) -> MediaState {
        let log = self.log.borrow();
        if log.sources.is_empty() {
            MediaState::Empty
        } else {
            MediaState::Ready
        }
    }
}
