//! Display pipeline: reordering, paging, lazy audio and the detail view.

pub mod detail;
pub mod lazy_audio;
pub mod paging;
pub mod reorder;

pub use detail::DetailController;
pub use lazy_audio::{
    Bounds, CardAudioState, LazyAudioController, MediaElement, MediaHost, MediaSource, MediaState,
    ProximityZone, SourceKind,
};
pub use paging::{PageSlice, Paginator, page_slice};
pub use reorder::reorder;
