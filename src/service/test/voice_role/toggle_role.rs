use super::*;

/// Tests granting the role.
///
/// Expected: one add call and the member now holds the role
#[tokio::test]
async fn enable_adds_role() {
    let api = MockDiscordApi::new();
    let guilds = GuildRegistry::new();
    let service = VoiceRoleService::new(&api, &guilds, ROLE_NAME);

    service
        .toggle_role(GUILD_ID, UserId::new(1), RoleId::new(VOICE_ROLE_ID), true)
        .await
        .unwrap();

    assert_eq!(
        api.calls(),
        vec![ToggleCall {
            user_id: UserId::new(1),
            role_id: RoleId::new(VOICE_ROLE_ID),
            enable: true,
        }]
    );
    assert_eq!(api.holders(), ids(&[1]));
}

/// Tests revoking the role.
///
/// Expected: one remove call and the member no longer holds the role
#[tokio::test]
async fn disable_removes_role() {
    let api = MockDiscordApi::new().with_holders(&[1, 2]);
    let guilds = GuildRegistry::new();
    let service = VoiceRoleService::new(&api, &guilds, ROLE_NAME);

    service
        .toggle_role(GUILD_ID, UserId::new(1), RoleId::new(VOICE_ROLE_ID), false)
        .await
        .unwrap();

    assert_eq!(api.toggled(false), ids(&[1]));
    assert!(api.toggled(true).is_empty());
    assert_eq!(api.holders(), ids(&[2]));
}

/// Tests a failed toggle without a name cache.
///
/// Expected: Err(RoleToggleFailed) naming the direction and the `<unknown>` role
#[tokio::test]
async fn failure_reports_direction_and_placeholder_name() {
    let api = MockDiscordApi::new().failing_toggle_for(&[1]);
    let guilds = GuildRegistry::new();
    let service = VoiceRoleService::new(&api, &guilds, ROLE_NAME);

    let result = service
        .toggle_role(GUILD_ID, UserId::new(1), RoleId::new(VOICE_ROLE_ID), false)
        .await;

    match result {
        Err(VoiceRoleError::RoleToggleFailed {
            role,
            user_id,
            enable,
            source,
        }) => {
            assert_eq!(role, "<unknown>");
            assert_eq!(user_id, UserId::new(1));
            assert!(!enable);
            assert_eq!(source.to_string(), "toggle failed");
        }
        other => panic!("expected RoleToggleFailed, got {:?}", other),
    }
}

/// Tests a failed toggle with the role name cached.
///
/// Expected: Err(RoleToggleFailed) carrying the cached role name
#[tokio::test]
async fn failure_uses_cached_role_name() {
    let api = MockDiscordApi::new().failing_toggle_for(&[1]);
    let names = MockNameCache::new().with_role(VOICE_ROLE_ID, ROLE_NAME);
    let guilds = GuildRegistry::new();
    let service = VoiceRoleService::new(&api, &guilds, ROLE_NAME).with_names(&names);

    let err = service
        .toggle_role(GUILD_ID, UserId::new(1), RoleId::new(VOICE_ROLE_ID), true)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to toggle role \"voice\" (enable=true) for member 1: toggle failed"
    );
}

/// Tests that missing cache entries never fail a toggle.
///
/// Expected: Ok even though neither the role nor the member is cached
#[tokio::test]
async fn missing_names_do_not_fail_toggle() {
    let api = MockDiscordApi::new();
    let names = MockNameCache::new();
    let guilds = GuildRegistry::new();
    let service = VoiceRoleService::new(&api, &guilds, ROLE_NAME).with_names(&names);

    let result = service
        .toggle_role(GUILD_ID, UserId::new(5), RoleId::new(VOICE_ROLE_ID), true)
        .await;

    assert!(result.is_ok());
    assert_eq!(api.holders(), ids(&[5]));
}
