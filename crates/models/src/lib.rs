pub mod errors;
pub mod db;
pub mod user;
pub mod user_credentials;
pub mod owner_profile;
pub mod trainer_profile;


#[cfg(test)]
mod db_roundtrip_tests {
    use migration::MigratorTrait;
    use uuid::Uuid;

    use crate::{db, owner_profile, user};

    // Exercises the SeaORM entities against a real database when one is
    // reachable; otherwise skips so the suite stays runnable offline.
    #[tokio::test]
    async fn test_user_and_owner_profile_crud() {
        let db = match db::connect().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return;
            }
        };
        if let Err(e) = migration::Migrator::up(&db, None).await {
            eprintln!("skip: migrate up failed: {}", e);
            return;
        }

        let email = format!("crud_{}@example.com", Uuid::new_v4());
        let u = user::create(
            &db,
            user::NewUser {
                email: email.clone(),
                role: "owner".into(),
                first_name: "Dana".into(),
                last_name: "Woof".into(),
                phone: "5551234567".into(),
                zip_code: "94107".into(),
            },
        )
        .await
        .expect("create user");
        assert_eq!(u.email, email);
        assert_eq!(u.profile_photo, "");

        let profile = owner_profile::create_empty(&db, u.id).await.expect("create owner profile");
        assert_eq!(profile.user_id, u.id);
        assert!(profile.dogs.0.is_empty());

        let dogs = vec![owner_profile::DogEntry {
            id: Uuid::new_v4(),
            name: "Rex".into(),
            breed: "Lab".into(),
            age: 3,
            size: owner_profile::DogSize::Large,
            photos: vec![],
        }];
        let saved = owner_profile::save_dogs(&db, u.id, dogs.clone())
            .await
            .expect("save dogs")
            .expect("owner exists");
        assert_eq!(saved.dogs.0, dogs);

        // FK cascade removes the profile with the user
        user::hard_delete(&db, u.id).await.expect("hard delete");
        let gone = owner_profile::find_by_user_id(&db, u.id).await.expect("find");
        assert!(gone.is_none());
    }
}
