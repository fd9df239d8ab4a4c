//! Test fixtures: a fully wired schema over fresh stores

#![allow(dead_code)]

use std::sync::Arc;

use tally_api::graphql::{SchemaBuilder, TallySchema};
use tally_api::models::{User, UserRole};
use tally_api::repositories::{TodoRepository, UserRepository};
use tally_api::services::{seed, AccessPolicy, AuthService, IdentityProvider, PasswordService};
use tally_oauth_client::OAuthClient;
use tally_shared_config::{OAuthProviderConfig, PasswordHashConfig};

/// Schema plus direct handles on its stores
pub struct TestApp {
    pub schema: TallySchema,
    pub users: UserRepository,
    pub todos: TodoRepository,
    pub passwords: PasswordService,
}

impl TestApp {
    /// Ownership policy on, no identity provider
    pub fn new() -> Self {
        Self::build(AccessPolicy::default(), None)
    }

    pub fn with_policy(policy: AccessPolicy) -> Self {
        Self::build(policy, None)
    }

    /// App whose delegated login talks to `base_url` with client credentials
    pub fn with_oauth(base_url: &str) -> Self {
        let config = OAuthProviderConfig::new(base_url).with_client("client-id", "client-secret");
        Self::with_oauth_config(config)
    }

    pub fn with_oauth_config(config: OAuthProviderConfig) -> Self {
        let client = OAuthClient::new(config).expect("valid oauth config");
        Self::build(AccessPolicy::default(), Some(Arc::new(client)))
    }

    fn build(policy: AccessPolicy, provider: Option<Arc<dyn IdentityProvider>>) -> Self {
        let users = UserRepository::new();
        let todos = TodoRepository::new();
        let passwords = PasswordService::new(PasswordHashConfig::insecure_fast())
            .expect("test argon2 params");
        let auth = AuthService::new(users.clone(), passwords.clone(), provider);

        let schema = SchemaBuilder::new()
            .users(users.clone())
            .todos(todos.clone())
            .auth_service(auth)
            .access_policy(policy)
            .build()
            .expect("schema builds");

        Self {
            schema,
            users,
            todos,
            passwords,
        }
    }

    /// Load the sample users and todos
    pub async fn seeded(self) -> Self {
        seed::seed_sample_data(&self.users, &self.todos, &self.passwords)
            .await
            .expect("seed data");
        self
    }

    /// Insert an admin account directly into the store
    pub async fn insert_admin(&self, id: &str, email: &str, password: &str) -> User {
        let hash = self.passwords.hash(password).expect("hash");
        self.users
            .insert(User::with_id(id, email, Some(hash)).with_role(UserRole::Admin))
            .await
            .expect("insert admin")
    }
}
