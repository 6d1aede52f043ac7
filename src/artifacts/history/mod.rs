pub mod tracked_path;
