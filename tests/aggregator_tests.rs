#[cfg(test)]
mod tests {
    use cocina_rapida::aggregator::{aggregate, plan_with};
    use cocina_rapida::catalog::{Catalog, RecipeRow, RecipeTable};
    use cocina_rapida::errors::MenuError;
    use cocina_rapida::request::MenuRequest;
    use cocina_rapida::selector::SelectedDish;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(
            "Sopas",
            RecipeTable::from_rows(vec![
                RecipeRow::new(Some("Lentejas"), "cebolla", 1.0, None, Some(12)),
                RecipeRow::new(None, "aceite", 2.0, Some("cucharadas"), None),
                RecipeRow::new(Some("Gazpacho"), "tomate", 6.0, None, Some(56)),
                RecipeRow::new(None, "cebolla", 0.5, None, None),
                RecipeRow::new(None, "aceite", 3.0, Some("ml"), None),
            ]),
        );
        catalog.insert(
            "Verduras",
            RecipeTable::from_rows(vec![
                RecipeRow::new(Some("Pisto"), "tomate", 4.0, None, Some(81)),
                RecipeRow::new(None, "cebolla", 2.0, None, None),
            ]),
        );
        catalog
    }

    fn dish(category: &str, name: &str) -> SelectedDish {
        SelectedDish {
            category: category.to_string(),
            dish_name: name.to_string(),
            reference_page: None,
        }
    }

    #[test]
    fn test_sopas_scenario_only_selected_dishes_contribute() {
        let catalog = create_catalog();
        let selection = vec![dish("Sopas", "Lentejas"), dish("Sopas", "Gazpacho")];

        let summary = aggregate(&catalog, &selection).unwrap();

        assert_eq!(summary.get("cebolla").unwrap().quantity, 1.5);
        assert_eq!(summary.get("tomate").unwrap().quantity, 6.0);
        // First encountered unit wins; second aceite row says "ml"
        let aceite = summary.get("aceite").unwrap();
        assert_eq!(aceite.quantity, 5.0);
        assert_eq!(aceite.unit.as_deref(), Some("cucharadas"));
    }

    #[test]
    fn test_summing_spans_categories() {
        let catalog = create_catalog();
        let selection = vec![dish("Sopas", "Gazpacho"), dish("Verduras", "Pisto")];

        let summary = aggregate(&catalog, &selection).unwrap();

        // tomate: 6 from Gazpacho + 4 from Pisto; cebolla: 0.5 + 2
        assert_eq!(summary.get("tomate").unwrap().quantity, 10.0);
        assert_eq!(summary.get("cebolla").unwrap().quantity, 2.5);
    }

    #[test]
    fn test_summary_iterates_in_name_order() {
        let catalog = create_catalog();
        let selection = vec![dish("Sopas", "Lentejas"), dish("Sopas", "Gazpacho")];

        let summary = aggregate(&catalog, &selection).unwrap();
        let names: Vec<_> = summary.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["aceite", "cebolla", "tomate"]);
    }

    #[test]
    fn test_empty_selection_is_not_an_error() {
        let catalog = create_catalog();
        let summary = aggregate(&catalog, &[]).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.len(), 0);
    }

    #[test]
    fn test_plan_uses_one_selection_for_both_lists() {
        let catalog = create_catalog();
        let mut request = MenuRequest::new();
        request.set("Sopas", 1);
        request.set("Verduras", 1);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (selection, summary) = plan_with(&catalog, &request, &mut rng).unwrap();

            assert_eq!(selection.len(), 2);
            assert_eq!(summary, aggregate(&catalog, &selection).unwrap());
        }
    }

    #[test]
    fn test_nan_quantity_aborts_aggregation() {
        let mut catalog = create_catalog();
        catalog.insert(
            "Cremas",
            RecipeTable::from_rows(vec![RecipeRow::new(
                Some("Vichyssoise"),
                "nata",
                f64::NAN,
                Some("ml"),
                None,
            )]),
        );
        let selection = vec![dish("Cremas", "Vichyssoise")];

        let err = aggregate(&catalog, &selection).unwrap_err();
        assert!(matches!(err, MenuError::Aggregation(msg) if msg.contains("nata")));
    }
}
