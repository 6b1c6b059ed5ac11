#![no_main]

use libfuzzer_sys::fuzz_target;
use projsync::domain::value_objects::include_path::{join_include, to_host_path};
use projsync::domain::value_objects::IncludePattern;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let (folder, include) = content.split_once('\n').unwrap_or((content, ""));
        let _ = join_include(folder, include);

        let pattern = IncludePattern::folder(&to_host_path(folder));
        let to = IncludePattern::folder(&to_host_path(include));
        let _ = pattern.rewrite(include, &to);
    }
});
