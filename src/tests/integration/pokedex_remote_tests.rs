//! Pokédex View Remote Flows
//!
//! Catalog load, type selectors and the detail panel (profile plus 3D model)
//! against a local server.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::pokedex::{MSG_DETAIL_FAILED, MSG_MODEL_FAILED, MSG_NO_MODEL};
use crate::tests::common::{ids_of, tag, view_with};
use crate::tests::mocks::ScriptedMembershipSource;

async fn mount_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "name": "raichu", "url": "https://pokeapi.co/api/v2/pokemon/26/" },
                { "name": "pikachu", "url": "https://pokeapi.co/api/v2/pokemon/25/" }
            ]
        })))
        .mount(server)
        .await;
}

async fn mount_profile(server: &MockServer, id: u32, name: &str) {
    mount_profile_after(server, id, name, Duration::ZERO).await;
}

async fn mount_profile_after(server: &MockServer, id: u32, name: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(format!("/pokemon/{id}")))
        .respond_with(ResponseTemplate::new(200).set_delay(delay).set_body_json(json!({
            "id": id,
            "name": name,
            "height": 4,
            "weight": 60,
            "types": [ { "slot": 1, "type": { "name": "electric", "url": "" } } ],
            "stats": []
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/pokemon-species/{id}")))
        .respond_with(ResponseTemplate::new(200).set_delay(delay).set_body_json(json!({
            "generation": { "name": "generation-i", "url": "" }
        })))
        .mount(server)
        .await;
}

async fn mount_models(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/pokemon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pokemon": [{
                "id": 25,
                "forms": [
                    { "formName": "regular", "model": "a" },
                    { "formName": "shiny", "model": "b" }
                ]
            }]
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn view_for(server: &MockServer) -> crate::core::pokedex::PokedexView {
    view_with(
        Arc::new(ScriptedMembershipSource::new()),
        &server.uri(),
        &format!("{}/v1", server.uri()),
    )
}

#[tokio::test]
async fn test_load_catalog_installs_sorted_list() {
    let server = MockServer::start().await;
    mount_list(&server).await;
    let view = view_for(&server);

    let list = view.load_catalog().await.unwrap();

    assert_eq!(ids_of(&list), vec![25, 26]);
    let state = view.snapshot().await;
    assert!(Arc::ptr_eq(&state.visible, &state.full_list));
    assert!(state.error.is_none());
    assert!(!state.loading.list);
}

#[tokio::test]
async fn test_load_types_fills_selectors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [ { "name": "grass", "url": "" }, { "name": "fire", "url": "" } ]
        })))
        .mount(&server)
        .await;
    let view = view_for(&server);

    assert_eq!(view.load_types().await, vec![tag("fire"), tag("grass")]);
    assert_eq!(view.snapshot().await.types.len(), 2);
}

#[tokio::test]
async fn test_show_selected_loads_profile_and_model() {
    let server = MockServer::start().await;
    mount_list(&server).await;
    mount_profile(&server, 25, "pikachu").await;
    mount_models(&server).await;
    let view = view_for(&server);
    view.load_catalog().await.unwrap();

    assert!(view.select(25).await);
    view.show_selected().await;

    let state = view.snapshot().await;
    let profile = state.profile.expect("profile loaded");
    assert_eq!(profile.detail.name, "pikachu");
    assert_eq!(profile.species.generation, "generation-i");
    assert_eq!(state.variant.as_ref().unwrap().current().model_asset_ref, "a");
    assert!(state.error.is_none());
    assert!(state.model_error.is_none());
    assert!(!state.loading.detail && !state.loading.model);

    assert!(view.switch_variant("shiny").await);
    let state = view.snapshot().await;
    assert_eq!(state.variant.unwrap().current().model_asset_ref, "b");
}

#[tokio::test]
async fn test_creature_without_model_reports_inline() {
    let server = MockServer::start().await;
    mount_list(&server).await;
    mount_profile(&server, 26, "raichu").await;
    mount_models(&server).await;
    let view = view_for(&server);
    view.load_catalog().await.unwrap();

    assert!(view.select(26).await);
    view.show_selected().await;

    let state = view.snapshot().await;
    assert!(state.profile.is_some());
    assert!(state.variant.is_none());
    assert_eq!(state.model_error.as_deref(), Some(MSG_NO_MODEL));
}

#[tokio::test]
async fn test_profile_and_model_fail_independently() {
    let server = MockServer::start().await;
    mount_list(&server).await;
    mount_models(&server).await;
    // No detail or species routes: both return 404.
    let view = view_for(&server);
    view.load_catalog().await.unwrap();

    assert!(view.select(25).await);
    view.show_selected().await;

    let state = view.snapshot().await;
    assert!(state.profile.is_none());
    assert_eq!(state.error.as_deref(), Some(MSG_DETAIL_FAILED));
    assert!(state.variant.is_some());
    assert!(state.model_error.is_none());
}

#[tokio::test]
async fn test_model_catalog_failure_keeps_profile() {
    let server = MockServer::start().await;
    mount_list(&server).await;
    mount_profile(&server, 25, "pikachu").await;
    Mock::given(method("GET"))
        .and(path("/v1/pokemon"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let view = view_for(&server);
    view.load_catalog().await.unwrap();

    assert!(view.select(25).await);
    view.show_selected().await;

    let state = view.snapshot().await;
    assert!(state.profile.is_some());
    assert_eq!(state.model_error.as_deref(), Some(MSG_MODEL_FAILED));
}

#[tokio::test]
async fn test_late_profile_does_not_replace_newer_one() {
    let server = MockServer::start().await;
    mount_profile_after(&server, 25, "pikachu", Duration::from_millis(400)).await;
    mount_profile(&server, 26, "raichu").await;
    let view = view_for(&server);

    let slow = view.load_profile(25);
    let fast = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        view.load_profile(26).await;
    };
    tokio::join!(slow, fast);

    let state = view.snapshot().await;
    assert_eq!(state.profile.expect("profile").detail.name, "raichu");
    assert!(state.error.is_none());
    assert!(!state.loading.detail);
}

#[tokio::test]
async fn test_model_arriving_after_filter_change_is_dropped() {
    let server = MockServer::start().await;
    mount_list(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/pokemon"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(400))
                .set_body_json(json!([
                    { "id": 25, "forms": [ { "formName": "regular", "model": "a" } ] }
                ])),
        )
        .mount(&server)
        .await;
    let view = view_for(&server);
    view.load_catalog().await.unwrap();
    assert!(view.select(25).await);

    let load = view.load_model(25);
    let refilter = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        view.clear_filters().await.unwrap();
    };
    tokio::join!(load, refilter);

    let state = view.snapshot().await;
    assert!(state.variant.is_none());
    assert!(state.model_error.is_none());
    assert!(!state.loading.model);
}
