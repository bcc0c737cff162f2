use chrono::{DateTime, TimeZone, Utc};
use ksystem_core::{
    Clock, EmployeeRecord, IdGenerator, MemoryKvRepository, NewEmployee, Registry, StoreError,
    ValidationError,
};
use std::cell::Cell;

#[test]
fn first_access_seeds_example_record_once() {
    let registry = test_registry();
    let employees = registry.employees();

    let first = employees.get_all().unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].matricula, "1001");
    assert_eq!(first[0].full_name, "FUNCIONARIO EXEMPLO");
    assert_eq!(first[0].department, "TECNOLOGIA DA INFORMAÇÃO");

    let second = employees.get_all().unwrap();
    assert_eq!(first, second);
}

#[test]
fn add_then_get_all_roundtrip() {
    let registry = test_registry();
    let employees = registry.employees();
    employees.delete_all().unwrap();

    let created = employees.add(new_employee("2001", "MARIA.S")).unwrap();
    assert_eq!(created.id, "id-1");
    assert_eq!(created.registered_at, fixed_instant());

    let all = employees.get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], created);
    assert_eq!(all[0].matricula, "2001");
    assert_eq!(all[0].login, "MARIA.S");
}

#[test]
fn duplicate_matricula_rejected_and_collection_unchanged() {
    let registry = test_registry();
    let employees = registry.employees();
    employees.delete_all().unwrap();

    employees.add(new_employee("1001", "A")).unwrap();
    let err = employees.add(new_employee("1001", "B")).unwrap_err();

    assert!(matches!(err, StoreError::DuplicateMatricula(m) if m == "1001"));
    assert_eq!(employees.get_all().unwrap().len(), 1);
}

#[test]
fn duplicate_login_rejected_and_collection_unchanged() {
    let registry = test_registry();
    let employees = registry.employees();
    employees.delete_all().unwrap();

    employees.add(new_employee("1001", "SAME.LOGIN")).unwrap();
    let err = employees.add(new_employee("1002", "SAME.LOGIN")).unwrap_err();

    assert!(matches!(err, StoreError::DuplicateLogin(l) if l == "SAME.LOGIN"));
    assert_eq!(employees.get_all().unwrap().len(), 1);
}

#[test]
fn update_replaces_in_place_preserving_position() {
    let registry = test_registry();
    let employees = registry.employees();
    employees.delete_all().unwrap();

    employees.add(new_employee("1", "A")).unwrap();
    let middle = employees.add(new_employee("2", "B")).unwrap();
    employees.add(new_employee("3", "C")).unwrap();

    let mut updated = middle.clone();
    updated.full_name = "NOME ATUALIZADO".to_string();
    updated.sector = "VENDAS".to_string();
    employees.update(updated).unwrap();

    let all = employees.get_all().unwrap();
    let matriculas: Vec<&str> = all.iter().map(|r| r.matricula.as_str()).collect();
    assert_eq!(matriculas, ["1", "2", "3"]);
    assert_eq!(all[1].full_name, "NOME ATUALIZADO");
    assert_eq!(all[1].sector, "VENDAS");
    assert_eq!(all[1].registered_at, middle.registered_at);
}

#[test]
fn update_unknown_id_returns_not_found() {
    let registry = test_registry();
    let employees = registry.employees();
    employees.delete_all().unwrap();

    let ghost = record_with_id("missing-id", "9", "GHOST");
    let err = employees.update(ghost).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == "missing-id"));
}

#[test]
fn update_rejects_collision_with_another_record() {
    let registry = test_registry();
    let employees = registry.employees();
    employees.delete_all().unwrap();

    employees.add(new_employee("1", "A")).unwrap();
    let second = employees.add(new_employee("2", "B")).unwrap();

    let mut stolen_matricula = second.clone();
    stolen_matricula.matricula = "1".to_string();
    let err = employees.update(stolen_matricula).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateMatricula(m) if m == "1"));

    let mut stolen_login = second.clone();
    stolen_login.login = "A".to_string();
    let err = employees.update(stolen_login).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateLogin(l) if l == "A"));

    // Keeping its own matricula/login is not a collision.
    let mut self_update = second;
    self_update.full_name = "STILL B".to_string();
    employees.update(self_update).unwrap();
}

#[test]
fn delete_removes_record_and_rejects_unknown_id() {
    let registry = test_registry();
    let employees = registry.employees();
    employees.delete_all().unwrap();

    let created = employees.add(new_employee("1", "A")).unwrap();
    employees.delete(&created.id).unwrap();
    assert!(employees.get_all().unwrap().is_empty());

    let err = employees.delete(&created.id).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn delete_all_persists_empty_collection_without_reseeding() {
    let registry = test_registry();
    let employees = registry.employees();

    assert_eq!(employees.get_all().unwrap().len(), 1);
    employees.delete_all().unwrap();

    // The empty snapshot is a persisted value, so no seed runs again.
    assert!(employees.get_all().unwrap().is_empty());
    assert!(employees.get_all().unwrap().is_empty());
}

#[test]
fn matricula_exists_probe() {
    let registry = test_registry();
    let employees = registry.employees();
    employees.delete_all().unwrap();
    employees.add(new_employee("7777", "PROBE")).unwrap();

    assert!(employees.matricula_exists("7777").unwrap());
    assert!(!employees.matricula_exists("8888").unwrap());
}

#[test]
fn search_matches_across_fields_case_insensitively() {
    let registry = test_registry();
    let employees = registry.employees();
    employees.delete_all().unwrap();

    let mut first = new_employee("100", "JOAO.P");
    first.full_name = "JOÃO PEREIRA".to_string();
    first.department = "ESTOQUE".to_string();
    employees.add(first).unwrap();

    let mut second = new_employee("200", "ANA.L");
    second.full_name = "ANA LIMA".to_string();
    employees.add(second).unwrap();

    let by_login = employees.search("joao").unwrap();
    assert_eq!(by_login.len(), 1);
    assert_eq!(by_login[0].matricula, "100");

    let by_department = employees.search("estoque").unwrap();
    assert_eq!(by_department.len(), 1);

    let by_matricula = employees.search("200").unwrap();
    assert_eq!(by_matricula.len(), 1);
    assert_eq!(by_matricula[0].login, "ANA.L");

    assert_eq!(employees.search("   ").unwrap().len(), 2);
    assert!(employees.search("nothing-matches").unwrap().is_empty());
}

#[test]
fn find_by_branch_matches_exactly() {
    let registry = test_registry();
    let employees = registry.employees();
    employees.delete_all().unwrap();

    let mut doca = new_employee("1", "A");
    doca.branch = "L03 - DOCA".to_string();
    employees.add(doca).unwrap();

    let mut condor = new_employee("2", "B");
    condor.branch = "L01 - CONDOR".to_string();
    employees.add(condor).unwrap();

    let matched = employees.find_by_branch("L03 - DOCA").unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].matricula, "1");

    assert!(employees.find_by_branch("l03 - doca").unwrap().is_empty());
}

#[test]
fn blank_required_fields_are_rejected() {
    let registry = test_registry();
    let employees = registry.employees();
    employees.delete_all().unwrap();

    let mut blank_login = new_employee("1", "A");
    blank_login.login = "   ".to_string();
    let err = employees.add(blank_login).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::EmptyField("login"))
    ));
    assert!(employees.get_all().unwrap().is_empty());
}

struct SequentialIds {
    counter: Cell<u64>,
}

impl SequentialIds {
    fn new() -> Self {
        Self {
            counter: Cell::new(0),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let next = self.counter.get() + 1;
        self.counter.set(next);
        format!("id-{next}")
    }
}

struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_instant()
    }
}

fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap()
}

fn test_registry() -> Registry<MemoryKvRepository> {
    Registry::with_parts(
        MemoryKvRepository::new(),
        Box::new(SequentialIds::new()),
        Box::new(FixedClock),
    )
}

fn new_employee(matricula: &str, login: &str) -> NewEmployee {
    NewEmployee {
        matricula: matricula.to_string(),
        full_name: format!("EMPLOYEE {matricula}"),
        branch: "MATRIZ".to_string(),
        login: login.to_string(),
        password: "123".to_string(),
        department: "CPD".to_string(),
        sector: "DESENVOLVIMENTO".to_string(),
    }
}

fn record_with_id(id: &str, matricula: &str, login: &str) -> EmployeeRecord {
    EmployeeRecord {
        id: id.to_string(),
        matricula: matricula.to_string(),
        full_name: format!("EMPLOYEE {matricula}"),
        branch: "MATRIZ".to_string(),
        login: login.to_string(),
        password: "123".to_string(),
        department: "CPD".to_string(),
        sector: "DESENVOLVIMENTO".to_string(),
        registered_at: fixed_instant(),
    }
}
