mod apt_cache;
mod apt_orphans;
mod docker;
mod journal;
mod large_files;
mod thumbnails;
mod tmp_files;
mod trash;
mod user_caches;

use crate::cleaner::Cleaner;

pub fn all_cleaners(
    min_size_bytes: u64,
    scan_path: Option<&str>,
    journal_keep: &str,
) -> Vec<Box<dyn Cleaner>> {
    vec![
        Box::new(apt_cache::AptCache),
        Box::new(apt_orphans::AptOrphans),
        Box::new(journal::Journal::new(journal_keep)),
        Box::new(tmp_files::TmpFiles),
        Box::new(user_caches::UserCaches),
        Box::new(thumbnails::Thumbnails),
        Box::new(trash::Trash),
        Box::new(docker::DockerResources),
        Box::new(large_files::LargeFiles::new(min_size_bytes, scan_path)),
    ]
}

pub fn find_cleaner(
    name: &str,
    min_size_bytes: u64,
    scan_path: Option<&str>,
    journal_keep: &str,
) -> Option<Box<dyn Cleaner>> {
    all_cleaners(min_size_bytes, scan_path, journal_keep)
        .into_iter()
        .find(|c| c.name() == name)
}

pub fn all_cleaner_names() -> Vec<&'static str> {
    vec![
        "apt-cache",
        "apt-orphans",
        "journal",
        "tmp-files",
        "user-caches",
        "thumbnails",
        "trash",
        "docker",
        "large-files",
    ]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_names_match_cleaners() {
        let cleaners = all_cleaners(1024, None, "7d");
        let names: Vec<&'static str> = cleaners.iter().map(|c| c.name()).collect();
        assert_eq!(all_cleaner_names(), names);
    }

    #[test]
    fn test_find_cleaner() {
        assert!(find_cleaner("trash", 1024, None, "7d").is_some());
        assert!(find_cleaner("registry", 1024, None, "7d").is_none());
    }
}
