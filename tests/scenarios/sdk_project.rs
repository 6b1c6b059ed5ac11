//! Scenario: editing a modern project
//!
//! Journey: a developer adds, renames, moves and deletes files in a project
//! whose files are included by convention.
//!
//! Success Criteria:
//! - Build output and user files never show up
//! - The manifest is never rewritten

use std::path::{Path, MAIN_SEPARATOR};

use insta::assert_snapshot;
use projsync::{PackageReference, ProjectKind};

use crate::common::*;

#[test]
fn scenario_edit_sdk_project() {
    let env = TestEnv::new("Api.csproj", SDK_MANIFEST, SDK_FILES);
    let mut project = env.open();

    assert_eq!(project.kind(), ProjectKind::Convention);
    assert_snapshot!(summary(&project.files_and_folders(None).unwrap()), @"Controllers/, Program.cs");
    assert_eq!(
        project.folder_list().unwrap(),
        [format!(".{MAIN_SEPARATOR}"), "Controllers".to_string()]
    );

    assert_eq!(
        project.package_references().unwrap(),
        [
            PackageReference::new("Serilog.AspNetCore", Some("8.0.0".into())),
            PackageReference::new("Dapper", Some("2.1.24".into())),
        ]
    );
    let references = project.project_references().unwrap();
    assert_eq!(references[0].name(), "Domain");

    let controllers = env.path("Controllers");
    let users = project
        .create_file(&controllers, "UsersController.cs", Some("public class UsersController {}"))
        .unwrap();
    let accounts = project.rename_file(&users, "AccountsController.cs").unwrap();
    assert_snapshot!(
        summary(&project.files_and_folders(Some(Path::new("Controllers"))).unwrap()),
        @"AccountsController.cs, HomeController.cs"
    );

    let api = project.create_folder(&env.path("Api")).unwrap();
    let moved = project.move_file(&accounts, &api).unwrap();
    assert_eq!(std::fs::read_to_string(&moved).unwrap(), "public class UsersController {}");

    let renamed = project.rename_folder(&api, "Endpoints").unwrap();
    project.delete_folder(&renamed).unwrap();
    assert_listing_on_disk(project.as_mut(), None);

    assert_snapshot!(summary(&project.files_and_folders(None).unwrap()), @"Controllers/, Program.cs");
    assert_eq!(env.manifest_text(), SDK_MANIFEST);
}

#[test]
fn missing_folder_lists_nothing() {
    let env = TestEnv::new("Api.csproj", SDK_MANIFEST, SDK_FILES);
    let mut project = env.open();

    let listing = project.files_and_folders(Some(Path::new("Nope"))).unwrap();
    assert!(listing.is_empty());
}
