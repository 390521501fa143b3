//! In-memory student roster repository

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::student::{Student, StudentId, StudentQuery, StudentRepository};
use crate::domain::DomainError;

/// In-memory implementation of [`StudentRepository`]
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    students: RwLock<HashMap<StudentId, Student>>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn get(&self, id: &StudentId) -> Result<Option<Student>, DomainError> {
        let students = self.students.read().await;
        Ok(students.get(id).cloned())
    }

    async fn create(&self, student: Student) -> Result<Student, DomainError> {
        let mut students = self.students.write().await;

        if students.contains_key(student.id()) {
            return Err(DomainError::conflict(format!(
                "Student '{}' already exists",
                student.id()
            )));
        }

        students.insert(*student.id(), student.clone());
        Ok(student)
    }

    async fn update(&self, student: Student) -> Result<Student, DomainError> {
        let mut students = self.students.write().await;

        if !students.contains_key(student.id()) {
            return Err(DomainError::not_found(format!(
                "Student '{}' not found",
                student.id()
            )));
        }

        students.insert(*student.id(), student.clone());
        Ok(student)
    }

    async fn delete(&self, id: &StudentId) -> Result<bool, DomainError> {
        let mut students = self.students.write().await;
        Ok(students.remove(id).is_some())
    }

    async fn list(&self, query: &StudentQuery) -> Result<Vec<Student>, DomainError> {
        let students = self.students.read().await;
        let mut result: Vec<Student> = students
            .values()
            .filter(|s| query.matches(s))
            .cloned()
            .collect();

        result.sort_by(|a, b| a.full_name().cmp(b.full_name()));

        let offset = query.offset.unwrap_or(0);
        if offset < result.len() {
            result = result.into_iter().skip(offset).collect();
        } else {
            result.clear();
        }

        if let Some(limit) = query.limit {
            result.truncate(limit);
        }

        Ok(result)
    }

    async fn count(&self, query: &StudentQuery) -> Result<usize, DomainError> {
        let students = self.students.read().await;
        Ok(students.values().filter(|s| query.matches(s)).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::student::test_student;

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryStudentRepository::new();
        let student = test_student("João Silva");
        let id = *student.id();

        repo.create(student).await.unwrap();

        let fetched = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(fetched.full_name(), "João Silva");
    }

    #[tokio::test]
    async fn test_update_missing_student() {
        let repo = InMemoryStudentRepository::new();
        let student = test_student("João Silva");

        assert!(repo.update(student).await.is_err());
    }

    #[tokio::test]
    async fn test_search_filters_by_name() {
        let repo = InMemoryStudentRepository::new();
        repo.create(test_student("João Silva")).await.unwrap();
        repo.create(test_student("Maria Souza")).await.unwrap();
        repo.create(test_student("Carlos Oliveira")).await.unwrap();

        let query = StudentQuery::new().with_search("MAR");
        let students = repo.list(&query).await.unwrap();

        assert_eq!(students.len(), 1);
        assert_eq!(students[0].full_name(), "Maria Souza");
    }

    #[tokio::test]
    async fn test_list_is_sorted_and_paginated() {
        let repo = InMemoryStudentRepository::new();
        for name in ["Duda", "Ana", "Caio", "Bea"] {
            repo.create(test_student(name)).await.unwrap();
        }

        let query = StudentQuery::new().with_offset(1).with_limit(2);
        let students = repo.list(&query).await.unwrap();
        let names: Vec<&str> = students.iter().map(Student::full_name).collect();

        assert_eq!(names, vec!["Bea", "Caio"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryStudentRepository::new();
        let student = test_student("João Silva");
        let id = *student.id();

        repo.create(student).await.unwrap();
        assert!(repo.delete(&id).await.unwrap());
        assert!(!repo.delete(&id).await.unwrap());
    }
}
