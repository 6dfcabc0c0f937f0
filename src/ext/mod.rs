mod path_segments_ext;

pub use path_segments_ext::PathSegmentsExt;
