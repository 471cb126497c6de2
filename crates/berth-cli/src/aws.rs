use crate::config::CredentialSource;

/// Build an `SdkConfig` from an optional region and a credential source.
///
/// With no region the SDK's own chain (`AWS_REGION`, profile) decides.
pub async fn build_aws_config(
    region: Option<&str>,
    creds: &CredentialSource,
) -> aws_config::SdkConfig {
    let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest());

    if let Some(region) = region {
        builder = builder.region(aws_config::Region::new(region.to_string()));
    }

    match creds {
        CredentialSource::Inline {
            access_key_id,
            secret_access_key,
            session_token,
        } => {
            builder = builder.credentials_provider(aws_sdk_ecs::config::Credentials::new(
                access_key_id,
                secret_access_key,
                session_token.clone(),
                None,
                "berth-config",
            ));
        }
        CredentialSource::Profile { profile_name } => {
            builder = builder.profile_name(profile_name);
        }
        CredentialSource::DefaultChain => {}
    }

    builder.load().await
}
