use super::*;

#[test]
fn empty_set_is_none() {
    let api = MockDiscordApi::new();
    let guilds = GuildRegistry::new();
    let service = VoiceRoleService::new(&api, &guilds, ROLE_NAME);

    assert_eq!(service.member_list(GUILD_ID, &ids(&[])), "<none>");
}

#[test]
fn names_are_sorted_with_unknown_fallback() {
    let api = MockDiscordApi::new();
    let names = MockNameCache::new()
        .with_member(1, "zoe")
        .with_member(2, "adam");
    let guilds = GuildRegistry::new();
    let service = VoiceRoleService::new(&api, &guilds, ROLE_NAME).with_names(&names);

    assert_eq!(
        service.member_list(GUILD_ID, &ids(&[1, 2, 3])),
        "<unknown>, adam, zoe"
    );
}

#[test]
fn without_cache_every_name_is_unknown() {
    let api = MockDiscordApi::new();
    let guilds = GuildRegistry::new();
    let service = VoiceRoleService::new(&api, &guilds, ROLE_NAME);

    assert_eq!(
        service.member_list(GUILD_ID, &ids(&[1, 2])),
        "<unknown>, <unknown>"
    );
}
